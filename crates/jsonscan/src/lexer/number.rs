//! Number grammar as a transition table.
//!
//! ```text
//! number = [ "-" ] ( "0" / [1-9] *DIGIT ) [ "." 1*DIGIT ] [ ("e" / "E") [ "+" / "-" ] 1*DIGIT ]
//! ```
//!
//! Each byte is mapped to a [`Class`], and `(State, Class)` indexes
//! [`TRANSITIONS`]. A missing transition ends the token if the current state
//! is terminal and rejects it otherwise.

use super::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Sign,
    LeadingZero,
    Integer,
    Point,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl State {
    const COUNT: usize = 9;
    const ALL: [State; State::COUNT] = [
        State::Start,
        State::Sign,
        State::LeadingZero,
        State::Integer,
        State::Point,
        State::Fraction,
        State::Exponent,
        State::ExponentSign,
        State::ExponentDigits,
    ];

    /// States in which the number may end.
    const fn is_terminal(self) -> bool {
        matches!(
            self,
            State::LeadingZero | State::Integer | State::Fraction | State::ExponentDigits
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Minus,
    Plus,
    Zero,
    Digit,
    Dot,
    Exp,
    Other,
}

impl Class {
    const COUNT: usize = 7;
    const ALL: [Class; Class::COUNT] = [
        Class::Minus,
        Class::Plus,
        Class::Zero,
        Class::Digit,
        Class::Dot,
        Class::Exp,
        Class::Other,
    ];

    const fn of(byte: u8) -> Class {
        match byte {
            b'-' => Class::Minus,
            b'+' => Class::Plus,
            b'0' => Class::Zero,
            b'1'..=b'9' => Class::Digit,
            b'.' => Class::Dot,
            b'e' | b'E' => Class::Exp,
            _ => Class::Other,
        }
    }
}

const fn transition(state: State, class: Class) -> Option<State> {
    use Class::{Digit, Dot, Exp, Minus, Plus, Zero};
    use State::{
        Exponent, ExponentDigits, ExponentSign, Fraction, Integer, LeadingZero, Point, Sign, Start,
    };

    match (state, class) {
        (Start, Minus) => Some(Sign),
        (Start | Sign, Zero) => Some(LeadingZero),
        (Start | Sign, Digit) | (Integer, Zero | Digit) => Some(Integer),
        (LeadingZero | Integer, Dot) => Some(Point),
        (Point | Fraction, Zero | Digit) => Some(Fraction),
        (LeadingZero | Integer | Fraction, Exp) => Some(Exponent),
        (Exponent, Plus | Minus) => Some(ExponentSign),
        (Exponent | ExponentSign | ExponentDigits, Zero | Digit) => Some(ExponentDigits),
        _ => None,
    }
}

static CLASSES: [Class; 256] = {
    let mut table = [Class::Other; 256];
    let mut byte = 0;
    while byte < 256 {
        #[allow(clippy::cast_possible_truncation)]
        let class = Class::of(byte as u8);
        table[byte] = class;
        byte += 1;
    }
    table
};

static TRANSITIONS: [[Option<State>; Class::COUNT]; State::COUNT] = {
    let mut table = [[None; Class::COUNT]; State::COUNT];
    let mut s = 0;
    while s < State::COUNT {
        let mut c = 0;
        while c < Class::COUNT {
            table[s][c] = transition(State::ALL[s], Class::ALL[c]);
            c += 1;
        }
        s += 1;
    }
    table
};

/// Measures a number token, one slice at a time.
#[derive(Debug)]
pub(crate) struct NumberLexer {
    state: State,
}

impl NumberLexer {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Start,
        }
    }

    /// Returns `Done(n)` when byte `n` of the slice cannot extend the
    /// number; that byte is not part of the token.
    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Step {
        for (pos, &byte) in bytes.iter().enumerate() {
            let class = CLASSES[byte as usize];
            match TRANSITIONS[self.state as usize][class as usize] {
                Some(next) => self.state = next,
                None if self.state.is_terminal() => return Step::Done(pos),
                None => return Step::Reject,
            }
        }
        Step::NeedMore
    }

    /// Whether the number may end here because the input did.
    pub(crate) fn accepts_end(&self) -> bool {
        self.state.is_terminal()
    }
}
