//! Calculator intent.
//!
//! Free text is handed to `meval`; anything it cannot parse or evaluate means
//! "this was not math" and the dispatcher moves on. Python-style `**` and
//! postfix `!` are rewritten into forms `meval` understands first.

/// Significant digits used when rendering a result.
const SIG_DIGITS: usize = 15;

/// Evaluate `expr` as an arithmetic expression.
///
/// Returns `None` for syntax errors, unknown variables/functions and
/// non-finite results.
pub fn evaluate(expr: &str) -> Option<String> {
    let expr = expr.trim();
    if expr.is_empty() {
        return None;
    }

    let rewritten = rewrite_operators(expr)?;
    let parsed: meval::Expr = rewritten.parse().ok()?;

    let mut ctx = meval::Context::new();
    ctx.func("fact", factorial);
    let value = parsed.eval_with_context(&ctx).ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(format_significant(value))
}

/// `2**3` -> `2^3`, `5!` -> `fact(5)`, `(1+2)!` -> `fact((1+2))`.
///
/// `None` when a `!` has no operand to its left.
fn rewrite_operators(expr: &str) -> Option<String> {
    let expr = expr.replace("**", "^");
    let mut out = String::with_capacity(expr.len() + 8);

    for ch in expr.chars() {
        if ch != '!' {
            out.push(ch);
            continue;
        }
        let start = operand_start(&out)?;
        let operand = out.split_off(start);
        out.push_str("fact(");
        out.push_str(&operand);
        out.push(')');
    }
    Some(out)
}

/// Byte index where the operand ending at the end of `s` starts.
fn operand_start(s: &str) -> Option<usize> {
    let is_atom = |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '_';
    let last = s.chars().next_back()?;
    let mut chars = s.char_indices().rev();

    let mut start = match last {
        ')' => {
            let mut depth = 0usize;
            let mut open = None;
            for (i, c) in chars.by_ref() {
                match c {
                    ')' => depth += 1,
                    '(' => {
                        depth -= 1;
                        if depth == 0 {
                            open = Some(i);
                            break;
                        }
                    }
                    _ => {}
                }
            }
            open?
        }
        c if is_atom(c) => s.len(),
        _ => return None,
    };

    // Atom characters directly before: a number, a variable or a function name.
    for (i, c) in chars {
        if !is_atom(c) {
            break;
        }
        start = i;
    }
    if start == s.len() {
        None
    } else {
        Some(start)
    }
}

/// Factorial over non-negative integers; `NaN` otherwise so the input is rejected.
fn factorial(x: f64) -> f64 {
    if x < 0.0 || x.fract() != 0.0 || x > 170.0 {
        return f64::NAN;
    }
    (1..=x as u64).map(|n| n as f64).product()
}

/// Render `value` with a fixed number of significant digits.
///
/// `4.0` -> `4.00000000000000`, `1.0 / 3.0` -> `0.333333333333333`.
pub fn format_significant(value: f64) -> String {
    if value == 0.0 {
        return format!("{:.*}", SIG_DIGITS - 1, 0.0);
    }

    let magnitude = value.abs().log10().floor() as i32;
    if !(-5..15).contains(&magnitude) {
        return format!("{:.*e}", SIG_DIGITS - 1, value);
    }

    let decimals = (SIG_DIGITS as i32 - 1 - magnitude).max(0) as usize;
    let out = format!("{value:.decimals$}");

    // Rounding can carry into a new leading digit (9.999... -> 10.000...).
    let digits = out.chars().filter(|c| c.is_ascii_digit()).count();
    let leading_zeros = if magnitude < 0 {
        (-magnitude) as usize
    } else {
        0
    };
    if digits - leading_zeros > SIG_DIGITS && decimals > 0 {
        return format!("{value:.*}", decimals - 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_simple_arithmetic() {
        assert_eq!(evaluate("2+2").as_deref(), Some("4.00000000000000"));
        assert_eq!(evaluate("3*7").as_deref(), Some("21.0000000000000"));
        assert_eq!(evaluate(" 10 / 4 ").as_deref(), Some("2.50000000000000"));
        assert_eq!(evaluate("2^10").as_deref(), Some("1024.00000000000"));
    }

    #[test]
    fn renders_fractions_with_fifteen_significant_digits() {
        assert_eq!(evaluate("1/3").as_deref(), Some("0.333333333333333"));
        assert_eq!(evaluate("-0.5").as_deref(), Some("-0.500000000000000"));
    }

    #[test]
    fn zero_keeps_trailing_digits() {
        assert_eq!(evaluate("5-5").as_deref(), Some("0.00000000000000"));
    }

    #[test]
    fn rejects_non_math() {
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("   "), None);
        assert_eq!(evaluate("price bitcoin"), None);
        assert_eq!(evaluate("what is the meaning of life?"), None);
        assert_eq!(evaluate("hello"), None);
        assert_eq!(evaluate("2 +"), None);
    }

    #[test]
    fn rejects_non_finite_results() {
        assert_eq!(evaluate("1/0"), None);
        assert_eq!(evaluate("sqrt(-1)"), None);
    }

    #[test]
    fn accepts_python_power_operator() {
        assert_eq!(evaluate("2**3").as_deref(), Some("8.00000000000000"));
        assert_eq!(evaluate("2 ** 10").as_deref(), Some("1024.00000000000"));
    }

    #[test]
    fn accepts_postfix_factorial() {
        assert_eq!(evaluate("5!").as_deref(), Some("120.000000000000"));
        assert_eq!(evaluate("3!+1").as_deref(), Some("7.00000000000000"));
        assert_eq!(evaluate("(1+2)!").as_deref(), Some("6.00000000000000"));
        assert_eq!(evaluate("0!").as_deref(), Some("1.00000000000000"));
    }

    #[test]
    fn factorial_outside_integers_is_not_math() {
        assert_eq!(evaluate("2.5!"), None);
        assert_eq!(evaluate("(0-3)!"), None);
        assert_eq!(evaluate("hello!"), None);
        assert_eq!(evaluate("wow?!"), None);
        assert_eq!(evaluate("!"), None);
    }

    #[test]
    fn rewrite_wraps_factorial_operands() {
        assert_eq!(rewrite_operators("2**3").as_deref(), Some("2^3"));
        assert_eq!(rewrite_operators("5!").as_deref(), Some("fact(5)"));
        assert_eq!(
            rewrite_operators("sqrt(4)!").as_deref(),
            Some("fact(sqrt(4))")
        );
        assert_eq!(rewrite_operators("2*(1+2)!").as_deref(), Some("2*fact((1+2))"));
        assert_eq!(rewrite_operators(" !"), None);
    }

    #[test]
    fn large_values_use_scientific_notation() {
        let out = evaluate("10^20").unwrap();
        assert_eq!(out, "1.00000000000000e20");
    }

    #[test]
    fn rounding_carry_keeps_digit_count() {
        assert_eq!(format_significant(99999.99999999999), "100000.000000000");
    }
}
