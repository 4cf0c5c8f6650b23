//! Fixed lookup catalogs: subject name pools and the facility zone list.
//!
//! Plain static tables rather than enum types; callers treat the values as
//! opaque strings.

/// First-name pool sampled for generated subjects.
pub const FIRST_NAMES: [&str; 20] = [
    "Aarav", "Vivaan", "Aditya", "Vihaan", "Arjun",
    "Reyansh", "Ayaan", "Atharva", "Krishna", "Ishaan",
    "Shivani", "Aanya", "Aadhya", "Aaradhya", "Ananya",
    "Pari", "Anika", "Navya", "Diya", "Riya",
];

/// Last-name pool sampled for generated subjects.
pub const LAST_NAMES: [&str; 15] = [
    "Sharma", "Patel", "Singh", "Kumar", "Gupta",
    "Joshi", "Rao", "Reddy", "Nair", "Chauhan",
    "Mukherjee", "Agarwal", "Verma", "Mehta", "Iyer",
];

/// Named zones a subject can occupy.
pub const ZONES: [&str; 14] = [
    "Block A", "Block B", "Block C", "Block D",
    "Dining Hall", "Workshop", "Library", "Medical Wing",
    "Recreation Area", "Education Center", "Vocational Training",
    "Counseling Room", "Prayer Hall", "Visitor Area",
];
