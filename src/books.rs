//! The books of the Bible in canonical order, with their chapter counts.

use allocate::Unit;

/// The 39 books of the Old Testament (929 chapters).
pub const OLD_TESTAMENT: &'static [Unit<'static>] = &[
    Unit::new("Genesis", 50),
    Unit::new("Exodus", 40),
    Unit::new("Leviticus", 27),
    Unit::new("Numbers", 36),
    Unit::new("Deuteronomy", 34),
    Unit::new("Joshua", 24),
    Unit::new("Judges", 21),
    Unit::new("Ruth", 4),
    Unit::new("1 Samuel", 31),
    Unit::new("2 Samuel", 24),
    Unit::new("1 Kings", 22),
    Unit::new("2 Kings", 25),
    Unit::new("1 Chronicles", 29),
    Unit::new("2 Chronicles", 36),
    Unit::new("Ezra", 10),
    Unit::new("Nehemiah", 13),
    Unit::new("Esther", 10),
    Unit::new("Job", 42),
    Unit::new("Psalms", 150),
    Unit::new("Proverbs", 31),
    Unit::new("Ecclesiastes", 12),
    Unit::new("Song of Solomon", 8),
    Unit::new("Isaiah", 66),
    Unit::new("Jeremiah", 52),
    Unit::new("Lamentations", 5),
    Unit::new("Ezekiel", 48),
    Unit::new("Daniel", 12),
    Unit::new("Hosea", 14),
    Unit::new("Joel", 3),
    Unit::new("Amos", 9),
    Unit::new("Obadiah", 1),
    Unit::new("Jonah", 4),
    Unit::new("Micah", 7),
    Unit::new("Nahum", 3),
    Unit::new("Habakkuk", 3),
    Unit::new("Zephaniah", 3),
    Unit::new("Haggai", 2),
    Unit::new("Zechariah", 14),
    Unit::new("Malachi", 4),
];

/// The 27 books of the New Testament (260 chapters).
pub const NEW_TESTAMENT: &'static [Unit<'static>] = &[
    Unit::new("Matthew", 28),
    Unit::new("Mark", 16),
    Unit::new("Luke", 24),
    Unit::new("John", 21),
    Unit::new("Acts", 28),
    Unit::new("Romans", 16),
    Unit::new("1 Corinthians", 16),
    Unit::new("2 Corinthians", 13),
    Unit::new("Galatians", 6),
    Unit::new("Ephesians", 6),
    Unit::new("Philippians", 4),
    Unit::new("Colossians", 4),
    Unit::new("1 Thessalonians", 5),
    Unit::new("2 Thessalonians", 3),
    Unit::new("1 Timothy", 6),
    Unit::new("2 Timothy", 4),
    Unit::new("Titus", 3),
    Unit::new("Philemon", 1),
    Unit::new("Hebrews", 13),
    Unit::new("James", 5),
    Unit::new("1 Peter", 5),
    Unit::new("2 Peter", 3),
    Unit::new("1 John", 5),
    Unit::new("2 John", 1),
    Unit::new("3 John", 1),
    Unit::new("Jude", 1),
    Unit::new("Revelation", 22),
];
