/// Number of decimals shown for a successful result.
pub const DISPLAY_DECIMALS: usize = 3;

/// Exact ties at three decimals are the odd multiples of 1/16.
const TIE_SCALE: f64 = 16.0;

/// Format a result for display with three decimals.
///
/// Values are rounded to the nearest representable decimal; an exact tie
/// rounds away from zero (`0.0625` shows as `0.063`). Negative zero is shown
/// as `0.000`. Non-finite values never reach this point through the
/// evaluator, but are rendered as `NaN`/`inf` if passed in.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return format!("{:.*}", DISPLAY_DECIMALS, n);
    }
    let n = if n == 0.0 { 0.0 } else { n };
    let magnitude = format_magnitude(n.abs());
    if n.is_sign_negative() {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn format_magnitude(m: f64) -> String {
    let scaled = m * TIE_SCALE;
    let is_tie = scaled.fract() == 0.0 && scaled % 2.0 == 1.0;
    if !is_tie {
        return format!("{:.*}", DISPLAY_DECIMALS, m);
    }
    // A tie ends in `25` or `75` (k/16 for odd k), so the kept digit is 2 or 7
    // and rounding up never carries.
    let mut digits = format!("{:.*}", DISPLAY_DECIMALS + 1, m);
    digits.pop();
    match digits.pop() {
        Some('2') => digits.push('3'),
        Some('7') => digits.push('8'),
        _ => return format!("{:.*}", DISPLAY_DECIMALS, m),
    }
    digits
}
