//! CLI Exit Code Registry
//!
//! Every exit code the binary can return is defined here. Scripts bind the
//! "repeat last command" action to `menusearch repeat`, so these values are
//! part of the shell contract.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (I/O while saving state, output)   |
//! | 2    | Usage error (bad args, unreadable command menu)  |
//! | 3    | Nothing to repeat                                |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - could not write output or persist state.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing or unreadable command catalog.
pub const EXIT_USAGE: u8 = 2;

/// `repeat` found no recently used command in the current menu.
pub const EXIT_NOTHING_TO_REPEAT: u8 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_ERROR, EXIT_USAGE, EXIT_NOTHING_TO_REPEAT];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
