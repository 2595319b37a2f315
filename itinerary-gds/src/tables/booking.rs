//! Booking-letter (RBD) tables.
//!
//! Letters are listed in order of preference; the resolver takes the first.
//! A carrier listed here without a cabin does not sell that cabin.

use crate::domain::Cabin;

type CabinLetters = &'static [(Cabin, &'static str)];

pub(super) const CARRIER_LETTERS: &[(&str, CabinLetters)] = &[
    (
        "AA",
        &[
            (Cabin::First, "F A P"),
            (Cabin::Business, "J R D I"),
            (Cabin::Premium, "W P"),
            (Cabin::Economy, "Y B H K M"),
        ],
    ),
    (
        "UA",
        &[
            (Cabin::First, "F A"),
            (Cabin::Business, "J C D Z P"),
            (Cabin::Premium, "O A R"),
            (Cabin::Economy, "Y B M E U"),
        ],
    ),
    (
        "DL",
        &[
            (Cabin::First, "F P A"),
            (Cabin::Business, "J C D I Z"),
            (Cabin::Premium, "P A G"),
            (Cabin::Economy, "Y B M H Q"),
        ],
    ),
    (
        "BA",
        &[
            (Cabin::First, "F A"),
            (Cabin::Business, "J C D R I"),
            (Cabin::Premium, "W E T"),
            (Cabin::Economy, "Y B H K M"),
        ],
    ),
    (
        "AF",
        &[
            (Cabin::First, "P F"),
            (Cabin::Business, "J C D I Z"),
            (Cabin::Premium, "W S A"),
            (Cabin::Economy, "Y B M K H"),
        ],
    ),
    (
        "LH",
        &[
            (Cabin::First, "F A"),
            (Cabin::Business, "J C D Z P"),
            (Cabin::Premium, "G E N"),
            (Cabin::Economy, "Y B M U H"),
        ],
    ),
    (
        "KL",
        &[
            (Cabin::Business, "J C D I Z"),
            (Cabin::Premium, "W S A"),
            (Cabin::Economy, "Y B M K H"),
        ],
    ),
    (
        "AY",
        &[
            (Cabin::Business, "J C D I"),
            (Cabin::Premium, "W P"),
            (Cabin::Economy, "Y B H K M"),
        ],
    ),
    (
        "IB",
        &[
            (Cabin::Business, "J C D R I"),
            (Cabin::Premium, "W E T"),
            (Cabin::Economy, "Y B H K M"),
        ],
    ),
    (
        "AZ",
        &[
            (Cabin::Business, "J C D I"),
            (Cabin::Premium, "W"),
            (Cabin::Economy, "Y B M H K"),
        ],
    ),
    (
        "EK",
        &[
            (Cabin::First, "F A"),
            (Cabin::Business, "J C I O"),
            (Cabin::Premium, "W"),
            (Cabin::Economy, "Y R E T W"),
        ],
    ),
    (
        "QR",
        &[
            (Cabin::First, "F A P"),
            (Cabin::Business, "J C D I R"),
            (Cabin::Economy, "Y B H K M"),
        ],
    ),
    (
        "B6",
        &[
            (Cabin::Business, "J C D I"),
            (Cabin::Economy, "Y E K H Q"),
        ],
    ),
];

pub(super) const GENERIC_LETTERS: &[(Cabin, &str)] = &[
    (Cabin::First, "F A P"),
    (Cabin::Business, "J C D I Z"),
    (Cabin::Premium, "W E"),
    (Cabin::Economy, "Y B M H K"),
];
