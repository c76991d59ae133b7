// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    grammar: GrammarLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_input_size: usize,
    max_identifier_length: usize,
    max_string_size: usize,
    max_token_count: usize,
}

#[derive(serde::Deserialize)]
struct GrammarLimits {
    max_nesting_depth: usize,
    max_list_items: usize,
    max_reported_text_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DDL_PROPS_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=DDL_PROPS_CONFIG_DIR");

    let profile = env::var("DDL_PROPS_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("DDL_PROPS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of ddl_props directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_INPUT_SIZE: usize = 100_000_000;
    const ABSOLUTE_MAX_NESTING_DEPTH: usize = 1_000;

    if config.lexical.max_input_size > ABSOLUTE_MAX_INPUT_SIZE {
        panic!("LIMITS: max_input_size exceeds absolute maximum");
    }

    if config.grammar.max_nesting_depth == 0
        || config.grammar.max_nesting_depth > ABSOLUTE_MAX_NESTING_DEPTH
    {
        panic!("LIMITS: max_nesting_depth must be between 1 and {ABSOLUTE_MAX_NESTING_DEPTH}");
    }

    if config.lexical.max_token_count == 0 || config.grammar.max_list_items == 0 {
        panic!("LIMITS: token and list limits cannot be zero");
    }

    if config.lexical.max_string_size > config.lexical.max_input_size {
        panic!("LIMITS: max_string_size cannot exceed max_input_size");
    }

    if profile == "production" && config.lexical.max_input_size > 10_000_000 {
        panic!("PRODUCTION: max_input_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_INPUT_SIZE: usize = {};
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_STRING_SIZE: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
    }}

    pub mod grammar {{
        pub const MAX_NESTING_DEPTH: usize = {};
        pub const MAX_LIST_ITEMS: usize = {};
        pub const MAX_REPORTED_TEXT_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.lexical.max_input_size,
        config.lexical.max_identifier_length,
        config.lexical.max_string_size,
        config.lexical.max_token_count,
        config.grammar.max_nesting_depth,
        config.grammar.max_list_items,
        config.grammar.max_reported_text_length,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
