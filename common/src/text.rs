//! Number formatting into fixed-capacity strings (no `format!`).

use heapless::String;

/// Capacity of a formatted step count. `u32::MAX` with separators is 13 chars.
pub const STEPS_TEXT_LEN: usize = 16;

/// Push a u32 value to a heapless string.
pub fn push_u32<const N: usize>(
    s: &mut String<N>,
    mut val: u32,
) {
    if val == 0 {
        s.push('0').ok();
        return;
    }

    // Build digits in reverse
    let mut digits = [0u8; 10];
    let mut i = 0;
    while val > 0 {
        digits[i] = (val % 10) as u8;
        val /= 10;
        i += 1;
    }

    while i > 0 {
        i -= 1;
        s.push((b'0' + digits[i]) as char).ok();
    }
}

/// Push a u32 value left-padded with zeros to at least `width` digits.
pub fn push_u32_padded<const N: usize>(
    s: &mut String<N>,
    val: u32,
    width: usize,
) {
    let mut digits: String<10> = String::new();
    push_u32(&mut digits, val);
    for _ in digits.len()..width {
        s.push('0').ok();
    }
    s.push_str(&digits).ok();
}

/// Format a step count with thousands separators, e.g. `12,345`.
pub fn format_steps(steps: u32) -> String<STEPS_TEXT_LEN> {
    let mut digits: String<10> = String::new();
    push_u32(&mut digits, steps);

    let mut out = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',').ok();
        }
        out.push(c).ok();
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
