//! Airline name to designator lookup.
//!
//! Names are matched case-insensitively on word boundaries, longest name
//! first, so "American Eagle" wins over "American".

pub(super) const AIRLINE_NAMES: &[(&str, &str)] = &[
    ("Aegean", "A3"),
    ("Aer Lingus", "EI"),
    ("Aeromexico", "AM"),
    ("Air Canada", "AC"),
    ("Air China", "CA"),
    ("Air Europa", "UX"),
    ("Air France", "AF"),
    ("Air India", "AI"),
    ("Air New Zealand", "NZ"),
    ("Air Transat", "TS"),
    ("Alaska", "AS"),
    ("Alaska Airlines", "AS"),
    ("Alitalia", "AZ"),
    ("All Nippon Airways", "NH"),
    ("ANA", "NH"),
    ("American", "AA"),
    ("American Airlines", "AA"),
    ("American Eagle", "AA"),
    ("Asiana", "OZ"),
    ("Austrian", "OS"),
    ("Avianca", "AV"),
    ("British Airways", "BA"),
    ("Brussels Airlines", "SN"),
    ("Cathay Pacific", "CX"),
    ("China Airlines", "CI"),
    ("China Eastern", "MU"),
    ("China Southern", "CZ"),
    ("Condor", "DE"),
    ("Copa", "CM"),
    ("Delta", "DL"),
    ("Delta Air Lines", "DL"),
    ("easyJet", "U2"),
    ("Edelweiss", "WK"),
    ("EL AL", "LY"),
    ("Emirates", "EK"),
    ("Ethiopian", "ET"),
    ("Etihad", "EY"),
    ("EVA Air", "BR"),
    ("Finnair", "AY"),
    ("Frontier", "F9"),
    ("Hawaiian", "HA"),
    ("Iberia", "IB"),
    ("Icelandair", "FI"),
    ("ITA Airways", "AZ"),
    ("Japan Airlines", "JL"),
    ("JetBlue", "B6"),
    ("KLM", "KL"),
    ("Korean Air", "KE"),
    ("LATAM", "LA"),
    ("LOT", "LO"),
    ("Lufthansa", "LH"),
    ("Norwegian", "DY"),
    ("Qantas", "QF"),
    ("Qatar Airways", "QR"),
    ("Royal Air Maroc", "AT"),
    ("Ryanair", "FR"),
    ("SAS", "SK"),
    ("Scandinavian Airlines", "SK"),
    ("Singapore Airlines", "SQ"),
    ("South African Airways", "SA"),
    ("Southwest", "WN"),
    ("Spirit", "NK"),
    ("Sun Country", "SY"),
    ("SWISS", "LX"),
    ("TAP Air Portugal", "TP"),
    ("Thai Airways", "TG"),
    ("Turkish Airlines", "TK"),
    ("United", "UA"),
    ("Virgin Atlantic", "VS"),
    ("Virgin Australia", "VA"),
    ("Vueling", "VY"),
    ("WestJet", "WS"),
];
