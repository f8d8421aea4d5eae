//! Static translation tables for catalogue vocabulary.
//!
//! All lookups are fail-open: an unknown key is returned unchanged so that
//! vocabulary drift on the source site degrades output quality instead of
//! halting the harvest. Misses are logged so the tables can be grown.

/// Danish/source field names to canonical English field names.
///
/// Several source spellings map to the same canonical name (the catalogue
/// uses both singular and plural department labels).
pub static KEY_TABLE: &[(&str, &str)] = &[
    ("varighed", "duration"),
    ("kursuskapacitet", "course capacity"),
    ("udbydende institutter", "contracting departments"),
    ("contracting department", "contracting departments"),
    ("udbydende institut", "contracting departments"),
    ("studienævn", "study board"),
    ("kursuskode", "course code"),
    ("niveau", "level"),
    ("sprog", "language"),
    ("Formelle krav", "Formal requirements"),
    ("skemagruppe", "schedule"),
    ("undervisere", "lecturers"),
    (
        "Anbefalede faglige forudsætninger",
        "Recommended Academic Qualifications",
    ),
    ("Arbejdsbelastning", "Workload"),
    ("Feedbackform", "Feedback form"),
    ("Bemærkninger", "Remarks"),
    ("Kursusindhold", "Content"),
    ("Målbeskrivelser", "Learning Outcome"),
    ("Undervisningsmateriale", "Literature"),
    ("kursusansvarlige", "course coordinators"),
    ("Uddannelse", "Education"),
    ("placering", "placement"),
    ("Undervisningsform", "Teaching and learning methods"),
    ("point", "credit"),
    ("udbydende fakultet", "contracting faculty"),
    ("Tilmelding", "Sign up"),
];

/// Danish faculty names to English.
pub static FACULTY_TABLE: &[(&str, &str)] = &[
    ("Det Juridiske Fakultet", "Faculty of Law"),
    ("Det Humanistiske Fakultet", "Faculty of Humanities"),
    ("Det Teologiske Fakultet", "Faculty of Theology"),
    (
        "Det Sundhedsvidenskabelige Fakultet",
        "Faculty of Health and Medical Sciences",
    ),
    ("Det Natur- og Biovidenskabelige Fakultet", "Faculty of Science"),
    (
        "Det Samfundsvidenskabelige Fakultet",
        "Faculty of Social Sciences",
    ),
];

/// Danish exam-table labels to English.
pub static EXAM_KEY_TABLE: &[(&str, &str)] = &[
    ("Reeksamen", "Re-exam"),
    ("Hjælpemidler", "Aid"),
    ("Eksamensperiode", "Exam period"),
    ("Bedømmelsesform", "Marking scale"),
    ("Prøveformsdetaljer", "Type of assessment details"),
    ("Prøveform", "Type of assessment"),
    (
        "Krav til indstilling til eksamen",
        "Exam registration requirements",
    ),
    ("Point", "Credit"),
    ("Censurform", "Censorship form"),
];

/// Danish workload category names to English. Seminar is Seminar.
pub static WORKLOAD_TABLE: &[(&str, &str)] = &[
    ("E-læring", "E-Learning"),
    ("Eksamen", "Exam"),
    ("Laboratorie", "Laboratory"),
    ("Studiegrupper", "Study Groups"),
    ("Teoretiske øvelser", "Theory exercises"),
    ("Feltarbejde", "Field Work"),
    ("Forberedelse (anslået)", "Preparation"),
    ("Eksamensforberedelse", "Exam Preparation"),
    ("Ekskursioner", "Excursions"),
    ("Forelæsninger", "Lectures"),
    ("Praktiske øvelser", "Practical exercises"),
    ("Projektarbejde", "Project work"),
    ("Øvelser", "Exercises"),
    ("Vejledning", "Guidance"),
    ("Holdundervisning", "Class Instruction"),
    ("Praktik", "Practical Training"),
    ("I alt", "Total"),
];

/// Look up `key` in a translation table, returning `key` itself on a miss.
///
/// Misses are logged at debug level with the table name so that new source
/// vocabulary shows up in telemetry without interrupting the harvest.
///
/// # Arguments
/// * `table` - Translation table to search
/// * `key` - Source key
/// * `table_name` - Table identifier for the miss log
#[must_use]
pub fn lookup_or_identity<'a>(
    table: &[(&'a str, &'a str)],
    key: &'a str,
    table_name: &str,
) -> &'a str {
    match table.iter().find(|(source, _)| *source == key) {
        Some((_, translated)) => translated,
        None => {
            tracing::debug!(table = table_name, key, "Translation miss, passing through");
            key
        }
    }
}
