//! formulary_engine - Safe arithmetic expression engine for formula cards.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use std::collections::HashMap;

    fn bindings(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_power_from_voltage_and_current() {
        let b = bindings(&[("U", 230.0), ("I", 2.0)]);
        let value = evaluate_expression("U * I", &["U", "I"], &b).unwrap();
        assert_eq!(format_number(value), "460.000");
    }

    #[test]
    fn test_division_by_zero_is_invalid_result() {
        let b = bindings(&[("P", 460.0), ("U", 0.0)]);
        assert_eq!(
            evaluate_expression("P / U", &["P", "U"], &b),
            Err(ErrorKind::InvalidResult)
        );
    }

    #[test]
    fn test_statement_injection_is_illegal() {
        let b = bindings(&[("U", 230.0), ("I", 2.0)]);
        assert_eq!(
            evaluate_expression("U * I; alert(1)", &["U", "I"], &b),
            Err(ErrorKind::IllegalCharacter)
        );
    }

    #[test]
    fn test_undeclared_variable_is_reported() {
        let b = bindings(&[("U", 230.0), ("I", 2.0)]);
        assert_eq!(
            evaluate_expression("U * K", &["U", "I"], &b),
            Err(ErrorKind::UnknownVariable(vec!["K".to_string()]))
        );
    }

    #[test]
    fn test_empty_expression() {
        let b = bindings(&[]);
        assert_eq!(
            evaluate_expression("", &["U"], &b),
            Err(ErrorKind::EmptyExpression)
        );
        assert_eq!(
            evaluate_expression("   ", &["U"], &b),
            Err(ErrorKind::EmptyExpression)
        );
    }

    #[test]
    fn test_standard_precedence_and_grouping() {
        let b = bindings(&[("a", 2.0), ("b", 3.0), ("c", 4.0)]);
        let vars = ["a", "b", "c"];
        assert_eq!(evaluate_expression("a + b * c", &vars, &b), Ok(14.0));
        assert_eq!(evaluate_expression("(a + b) * c", &vars, &b), Ok(20.0));
        assert_eq!(evaluate_expression("c / a / a", &vars, &b), Ok(1.0));
        assert_eq!(evaluate_expression("c - b - a", &vars, &b), Ok(-1.0));
    }

    #[test]
    fn test_unary_minus() {
        let b = bindings(&[("U", 5.0)]);
        assert_eq!(evaluate_expression("-U", &["U"], &b), Ok(-5.0));
        assert_eq!(evaluate_expression("-U * 2", &["U"], &b), Ok(-10.0));
        assert_eq!(evaluate_expression("2 * -U", &["U"], &b), Ok(-10.0));
        assert_eq!(evaluate_expression("-(U - 7)", &["U"], &b), Ok(2.0));
        assert_eq!(evaluate_expression("- -U", &["U"], &b), Ok(5.0));
    }

    #[test]
    fn test_comma_decimal_separator() {
        let b = bindings(&[("U", 2.0)]);
        assert_eq!(evaluate_expression("U * 1,5", &["U"], &b), Ok(3.0));
    }

    #[test]
    fn test_malformed_syntax_passing_character_filter() {
        let b = bindings(&[("U", 1.0)]);
        for expr in ["3+*2", "U U", "(U", "U)", "1.2.3", "3U", "()"] {
            assert_eq!(
                evaluate_expression(expr, &["U"], &b),
                Err(ErrorKind::EvaluationFailed),
                "{expr}"
            );
        }
    }

    #[test]
    fn test_very_long_operator_chain_fails_cleanly() {
        let b = bindings(&[("U", 1.0)]);
        let chain = vec!["U"; 100_000].join("+");
        assert_eq!(
            evaluate_expression(&chain, &["U"], &b),
            Err(ErrorKind::EvaluationFailed)
        );

        let short = vec!["U"; 1000].join("+");
        assert_eq!(evaluate_expression(&short, &["U"], &b), Ok(1000.0));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let b = bindings(&[("R", 4.7), ("I", 0.3)]);
        let first = evaluate_expression("R * I * I", &["R", "I"], &b);
        let second = evaluate_expression("R * I * I", &["R", "I"], &b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_any_foreign_character_is_illegal() {
        let vars = ["U", "I"];
        for c in [';', '=', '{', '}', '`', '\'', '"', '[', ']', '!', '&', '|', '$', '#', '~', '<', '>', '%', '^', '?', ':', '@', '\\'] {
            let expr = format!("U {} I", c);
            assert_eq!(validate(&expr, &vars), Err(ErrorKind::IllegalCharacter), "{expr}");
            let expr = format!("K{}", c);
            assert_eq!(validate(&expr, &vars), Err(ErrorKind::IllegalCharacter), "{expr}");
        }
    }

    #[test]
    fn test_allowed_expressions_are_returned_cleaned() {
        let vars = ["U", "I", "R_1"];
        for raw in ["U*I", "  (U + I) / R_1 ", "2,5 * U", "\t-U - -I\n", "0.5*R_1"] {
            let expected = raw.replace(',', ".").trim().to_string();
            assert_eq!(validate(raw, &vars), Ok(expected), "{raw}");
        }
    }

    #[test]
    fn test_resolve_is_total() {
        let b = bindings(&[("U", 1.0), ("X", 9.0)]);
        assert_eq!(resolve(&["U", "I", "R"], &b), vec![1.0, 0.0, 0.0]);
        assert_eq!(resolve(&["U"], &HashMap::new()), vec![0.0]);
    }
}
