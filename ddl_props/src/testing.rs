//! Round-trip helpers for descriptor tests

use crate::props::{Prop, PropError, PropValue, RawValue};

/// Typecheck a raw capture, then render the resulting value
pub fn typecheck_and_render(prop: &Prop, raw: impl Into<RawValue>) -> Result<String, PropError> {
    let value = prop.typecheck(raw.into())?;
    prop.render(Some(&value))
}

/// Render a value, then parse the rendered text back
pub fn render_and_parse(prop: &Prop, value: &PropValue) -> Result<PropValue, PropError> {
    let rendered = prop.render(Some(value))?;
    prop.parse(&rendered)
}

/// Panic unless `value` survives render followed by parse unchanged
#[track_caller]
pub fn assert_round_trip(prop: &Prop, value: PropValue) {
    let rendered = match prop.render(Some(&value)) {
        Ok(rendered) => rendered,
        Err(err) => panic!("{} failed to render {:?}: {}", prop, value, err),
    };
    match prop.parse(&rendered) {
        Ok(parsed) => assert_eq!(
            parsed, value,
            "{} round trip through {:?} changed the value",
            prop, rendered
        ),
        Err(err) => panic!("{} failed to parse its own output {:?}: {}", prop, rendered, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_typecheck_and_render() {
        let prop = Prop::boolean("enabled");
        assert_eq!(typecheck_and_render(&prop, "true").unwrap(), "ENABLED = TRUE");
        assert_matches!(
            typecheck_and_render(&prop, "yes"),
            Err(PropError::InvalidValue { .. })
        );
    }

    #[test]
    fn test_render_and_parse() {
        let prop = Prop::integer("max_concurrency_level");
        assert_eq!(
            render_and_parse(&prop, &PropValue::Int(8)).unwrap(),
            PropValue::Int(8)
        );
    }

    #[test]
    #[should_panic(expected = "round trip")]
    fn test_assert_round_trip_reports_changes() {
        // Quotes added on render are kept on parse.
        assert_round_trip(&Prop::string("comment"), PropValue::string("x"));
    }
}
