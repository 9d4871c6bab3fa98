use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the gold price sources tracked by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Sjc,
    DojiHn,
    DojiSg,
    BaoTinMinhChau,
    PhuQuySjc,
    PnjTpHcml,
    PnjHn,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown gold type: {0}")]
pub struct UnknownInstrument(pub String);

impl Instrument {
    /// Crawl order used at startup and by the scheduled job.
    pub const ALL: [Instrument; 7] = [
        Instrument::Sjc,
        Instrument::DojiHn,
        Instrument::DojiSg,
        Instrument::BaoTinMinhChau,
        Instrument::PhuQuySjc,
        Instrument::PnjTpHcml,
        Instrument::PnjHn,
    ];

    /// Row order of the notification table.
    pub const DISPLAY_ORDER: [Instrument; 7] = [
        Instrument::BaoTinMinhChau,
        Instrument::DojiHn,
        Instrument::DojiSg,
        Instrument::PhuQuySjc,
        Instrument::PnjHn,
        Instrument::PnjTpHcml,
        Instrument::Sjc,
    ];

    /// Identifier used in source URLs, cache keys and JSON.
    pub fn slug(self) -> &'static str {
        match self {
            Instrument::Sjc => "sjc",
            Instrument::DojiHn => "doji_hn",
            Instrument::DojiSg => "doji_sg",
            Instrument::BaoTinMinhChau => "bao_tin_minh_chau",
            Instrument::PhuQuySjc => "phu_quy_sjc",
            Instrument::PnjTpHcml => "pnj_tp_hcml",
            Instrument::PnjHn => "pnj_hn",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Instrument::Sjc => "SJC",
            Instrument::DojiHn => "DOJI HN",
            Instrument::DojiSg => "DOJI SG",
            Instrument::BaoTinMinhChau => "Bảo Tín Minh Châu",
            Instrument::PhuQuySjc => "Phú Quý SJC",
            Instrument::PnjTpHcml => "PNJ TP.HCM",
            Instrument::PnjHn => "PNJ HN",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Instrument {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .iter()
            .copied()
            .find(|i| i.slug() == s)
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}
