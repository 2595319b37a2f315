//! Short-haul airport regions.
//!
//! Two airports in the same region form a short-haul sector. Airports not
//! listed fall back to flight duration.

/// A group of airports whose mutual sectors are short-haul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Europe,
    JapanDomestic,
    AustraliaEast,
}

pub(super) const SHORT_HAUL_REGIONS: &[(Region, &[&str])] = &[
    (
        Region::Europe,
        &[
            "AMS", "ARN", "ATH", "BCN", "BRU", "BUD", "CDG", "CPH", "DUB", "DUS", "EDI", "FCO",
            "FRA", "GVA", "HAM", "HEL", "LGW", "LHR", "LIN", "LIS", "LYS", "MAD", "MAN", "MRS",
            "MUC", "MXP", "NCE", "ORY", "OSL", "PRG", "STR", "TXL", "BER", "VCE", "VIE", "WAW",
            "ZRH",
        ],
    ),
    (
        Region::JapanDomestic,
        &["CTS", "FUK", "HND", "ITM", "KIX", "NGO", "NRT", "OKA"],
    ),
    (Region::AustraliaEast, &["BNE", "CBR", "MEL", "OOL", "SYD"]),
];
