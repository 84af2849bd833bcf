//! Cabin seat map: 20 rows of `A`–`F`, a handful of seats already taken,
//! premium rows up front and the emergency-exit row.

#[cfg(test)]
#[path = "seats_test.rs"]
mod seats_test;

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;
use crate::util::money::Cop;

pub const ROWS: u8 = 20;
pub const SEAT_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const OCCUPIED_SEATS: [&str; 6] = ["1A", "1B", "3C", "5F", "8A", "12D"];
pub const LAST_PREMIUM_ROW: u8 = 3;
pub const EMERGENCY_EXIT_ROW: u8 = 12;
pub const PREMIUM_SEAT_SURCHARGE: Cop = 50_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatClass {
    Premium,
    EmergencyExit,
    Standard,
}

impl SeatClass {
    /// Class of a seat id such as `"12F"`, decided by its row number.
    /// Ids without a leading row number are standard.
    pub fn of(seat_id: &str) -> Self {
        match parse_seat_id(seat_id) {
            Some((row, _)) => Self::for_row(row),
            None => Self::Standard,
        }
    }

    pub fn for_row(row: u8) -> Self {
        if (1..=LAST_PREMIUM_ROW).contains(&row) {
            Self::Premium
        } else if row == EMERGENCY_EXIT_ROW {
            Self::EmergencyExit
        } else {
            Self::Standard
        }
    }

    /// Label in the seat-selection summary.
    pub fn summary_label(self) -> &'static str {
        match self {
            Self::Premium => "Asiento Premium",
            Self::EmergencyExit => "Salida de Emergencia",
            Self::Standard => "Asiento Estándar",
        }
    }

    /// Label printed on the ticket.
    pub fn ticket_label(self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::EmergencyExit => "Salida de Emergencia",
            Self::Standard => "Económica",
        }
    }

    pub fn surcharge(self) -> Cop {
        match self {
            Self::Premium => PREMIUM_SEAT_SURCHARGE,
            Self::EmergencyExit | Self::Standard => 0,
        }
    }
}

/// Split `"12F"` into `(12, 'F')`. The letter is uppercased; anything that
/// is not digits followed by a single letter gives `None`.
pub fn parse_seat_id(seat_id: &str) -> Option<(u8, char)> {
    let seat_id = seat_id.trim();
    let split = seat_id.find(|c: char| !c.is_ascii_digit())?;
    let (digits, rest) = seat_id.split_at(split);
    let row = digits.parse::<u8>().ok()?;
    let mut letters = rest.chars();
    let letter = letters.next()?.to_ascii_uppercase();
    if letters.next().is_some() || !letter.is_ascii_alphabetic() {
        return None;
    }
    Some((row, letter))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub id: String,
    pub row: u8,
    pub letter: char,
    pub occupied: bool,
    pub class: SeatClass,
}

impl Seat {
    pub fn is_premium(&self) -> bool {
        self.class == SeatClass::Premium
    }

    pub fn is_emergency_exit(&self) -> bool {
        self.class == SeatClass::EmergencyExit
    }
}

#[derive(Clone, Debug)]
pub struct SeatMap {
    rows: Vec<Vec<Seat>>,
}

impl Default for SeatMap {
    fn default() -> Self {
        Self::with_occupied(&OCCUPIED_SEATS)
    }
}

impl SeatMap {
    pub fn with_occupied(occupied: &[&str]) -> Self {
        let rows = (1..=ROWS)
            .map(|row| {
                SEAT_LETTERS
                    .iter()
                    .map(|&letter| {
                        let id = format!("{row}{letter}");
                        Seat {
                            occupied: occupied.iter().any(|o| o.eq_ignore_ascii_case(&id)),
                            id,
                            row,
                            letter,
                            class: SeatClass::for_row(row),
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Seat>] {
        &self.rows
    }

    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        let (row, letter) = parse_seat_id(seat_id)?;
        self.rows
            .get(usize::from(row).checked_sub(1)?)?
            .iter()
            .find(|seat| seat.letter == letter)
    }

    /// Resolve a seat for selection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSeat`] for ids outside the cabin and
    /// [`ValidationError::SeatOccupied`] for seats already taken.
    pub fn select(&self, seat_id: &str) -> Result<&Seat, ValidationError> {
        let seat = self
            .seat(seat_id)
            .ok_or_else(|| ValidationError::UnknownSeat(seat_id.trim().to_owned()))?;
        if seat.occupied {
            return Err(ValidationError::SeatOccupied(seat.id.clone()));
        }
        Ok(seat)
    }

    pub fn available_count(&self) -> usize {
        self.rows.iter().flatten().filter(|seat| !seat.occupied).count()
    }
}

/// Plain-text cabin layout: `[ ]` free, `[X]` taken, `[P]` premium,
/// `[E]` emergency exit, with an aisle between `C` and `D`.
impl fmt::Display for SeatMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "     A  B  C    D  E  F")?;
        for row in &self.rows {
            let Some(first) = row.first() else { continue };
            write!(f, "{:>3} ", first.row)?;
            for seat in row {
                let mark = if seat.occupied {
                    'X'
                } else if seat.is_premium() {
                    'P'
                } else if seat.is_emergency_exit() {
                    'E'
                } else {
                    ' '
                };
                write!(f, "[{mark}]")?;
                if seat.letter == 'C' {
                    write!(f, "  ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
