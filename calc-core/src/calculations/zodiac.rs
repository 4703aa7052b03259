//! Western zodiac sign lookup.
//!
//! A twelve-entry month/day range table. Capricorn spans the year boundary,
//! so it is the fallthrough for late December and early January.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Air => "Air",
            Self::Water => "Water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// `(sign, (start month, start day), (end month, end day))`, inclusive on
/// both ends. Capricorn is absent; dates outside every range fall to it.
const SIGN_RANGES: [(ZodiacSign, (u32, u32), (u32, u32)); 11] = [
    (ZodiacSign::Aquarius, (1, 20), (2, 18)),
    (ZodiacSign::Pisces, (2, 19), (3, 20)),
    (ZodiacSign::Aries, (3, 21), (4, 19)),
    (ZodiacSign::Taurus, (4, 20), (5, 20)),
    (ZodiacSign::Gemini, (5, 21), (6, 20)),
    (ZodiacSign::Cancer, (6, 21), (7, 22)),
    (ZodiacSign::Leo, (7, 23), (8, 22)),
    (ZodiacSign::Virgo, (8, 23), (9, 22)),
    (ZodiacSign::Libra, (9, 23), (10, 22)),
    (ZodiacSign::Scorpio, (10, 23), (11, 21)),
    (ZodiacSign::Sagittarius, (11, 22), (12, 21)),
];

impl ZodiacSign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Aries => "\u{2648}",
            Self::Taurus => "\u{2649}",
            Self::Gemini => "\u{264a}",
            Self::Cancer => "\u{264b}",
            Self::Leo => "\u{264c}",
            Self::Virgo => "\u{264d}",
            Self::Libra => "\u{264e}",
            Self::Scorpio => "\u{264f}",
            Self::Sagittarius => "\u{2650}",
            Self::Capricorn => "\u{2651}",
            Self::Aquarius => "\u{2652}",
            Self::Pisces => "\u{2653}",
        }
    }

    pub fn element(&self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }

    pub fn date_range(&self) -> &'static str {
        match self {
            Self::Aries => "March 21 - April 19",
            Self::Taurus => "April 20 - May 20",
            Self::Gemini => "May 21 - June 20",
            Self::Cancer => "June 21 - July 22",
            Self::Leo => "July 23 - August 22",
            Self::Virgo => "August 23 - September 22",
            Self::Libra => "September 23 - October 22",
            Self::Scorpio => "October 23 - November 21",
            Self::Sagittarius => "November 22 - December 21",
            Self::Capricorn => "December 22 - January 19",
            Self::Aquarius => "January 20 - February 18",
            Self::Pisces => "February 19 - March 20",
        }
    }
}

/// The zodiac sign containing a birth date. Total over all dates.
pub fn sign_for(date: NaiveDate) -> ZodiacSign {
    let key = (date.month(), date.day());
    SIGN_RANGES
        .iter()
        .find(|(_, start, end)| key >= *start && key <= *end)
        .map(|(sign, _, _)| *sign)
        .unwrap_or(ZodiacSign::Capricorn)
}
