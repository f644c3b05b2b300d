// src/debug/printers.rs

//! A hodge-podge of printer macros and helpers for user-facing error
//! messages, and for test and debug builds.

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `d`ebug `e`println! an `err`or
#[macro_export]
macro_rules! de_err {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions,test))]
            eprint!("ERROR: ");
            #[cfg(any(debug_assertions,test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_err;

/// `e`println! an `err`or
#[macro_export]
macro_rules! e_err {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("ERROR: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_err;

/// `e`println! a `warn`ing
#[macro_export]
macro_rules! e_wrn {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("WARNING: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_wrn;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helper functions - various print and write
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// turn passed char into a char that is safe to print on one terminal
/// column. Control characters become their pictoral representation,
/// e.g. `'\n'` becomes `'␊'`. GP2 lines usually end with `"\r\n"`.
///
/// only intended to aid visual debugging
pub const fn char_to_char_noraw(c: char) -> char {
    match c as u32 {
        0 => '␀',
        9 => '␉',  // '\t'
        10 => '␊', // '\n'
        11 => '␋', // '\v'
        12 => '␌', // '\f'
        13 => '␍', // '\r'
        27 => '␛', // '\e'
        127 => '␡',
        1..=31 => '�',
        _ => c,
    }
}

/// transform buffer of bytes to a non-raw `String`.
/// Bytes that are not valid UTF-8 are printed as the replacement character.
#[allow(non_snake_case)]
pub fn buffer_to_String_noraw(buffer: &[u8]) -> String {
    let s = String::from_utf8_lossy(buffer);
    str_to_String_noraw(&s)
}

/// transform valid UTF8 str to non-raw String version
#[allow(non_snake_case)]
pub fn str_to_String_noraw(str_buf: &str) -> String {
    let mut s2 = String::with_capacity(str_buf.len() + 1);
    for c in str_buf.chars() {
        s2.push(char_to_char_noraw(c));
    }
    s2
}

/// Format bytes as space-separated uppercase hexadecimal, the way a GP2
/// line writes them, e.g. `[0x00, 0x12]` becomes `"00 12"`.
pub fn bytes_to_hex_tokens(buffer: &[u8]) -> String {
    let mut s = String::with_capacity(buffer.len() * 3);
    for (i, b) in buffer.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        s.push_str(&format!("{:02X}", b));
    }
    s
}
