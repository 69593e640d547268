use std::fmt::Write;

use crate::dates;
use crate::models::CertificateRecord;
use crate::services::listing::ListView;
use crate::services::verify::{NOT_FOUND_GUIDANCE, VerificationOutcome};

pub fn list_view(view: &ListView<'_>) -> String {
    let mut out = String::new();
    match view {
        ListView::Empty => {
            out.push_str("No certificates found.\n");
            out.push_str("Add your first certificate with `certdesk add`.\n");
        }
        ListView::Page { number, total_pages, total_records, offset, rows } => {
            let _ = writeln!(out, "Student Certificates ({})", total_records);
            let _ = writeln!(
                out,
                "{:<4} {:<26} {:<24} {:<20} {:<12} {:<6} {}",
                "#", "Student Name", "Father's Name", "Certificate No.", "Roll No.", "Year", "ID"
            );
            for (index, record) in rows.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:<4} {:<26} {:<24} {:<20} {:<12} {:<6} {}",
                    offset + index + 1,
                    record.student_name,
                    record.father_name,
                    record.certificate_number,
                    record.roll_no,
                    record.passing_year,
                    record.id
                );
            }
            let _ = writeln!(out, "Page {} of {}", number, total_pages);
        }
    }
    out
}

pub fn record_details(record: &CertificateRecord) -> String {
    let mut out = String::new();
    let fields = [
        ("Student Name", record.student_name.clone()),
        ("Father's Name", record.father_name.clone()),
        ("Date of Birth", dates::localized(&record.date_of_birth)),
        ("Certificate Number", record.certificate_number.clone()),
        ("Roll Number", record.roll_no.clone()),
        ("Passing Year", record.passing_year.clone()),
        ("Course Name", record.course_name.clone()),
        ("Course Duration", record.course_of_duration.clone()),
    ];
    for (label, value) in fields {
        let _ = writeln!(out, "  {:<20} {}", label, value);
    }
    out
}

pub fn verification(outcome: &VerificationOutcome) -> String {
    let mut out = String::new();
    match outcome {
        VerificationOutcome::Authentic(record) => {
            out.push_str("Certificate Verified: AUTHENTIC\n");
            out.push_str(&record_details(record));
            out.push_str(
                "This certificate has been issued by Tally Expert Computer Education Center \
                 and is hereby declared valid.\n",
            );
        }
        VerificationOutcome::NotFound { message } => {
            out.push_str("Certificate Not Found\n");
            let _ = writeln!(out, "{}", message);
            out.push_str("The certificate with the provided details was not found in our database.\n");
            out.push_str("Please ensure:\n");
            for hint in NOT_FOUND_GUIDANCE {
                let _ = writeln!(out, "  - {}", hint);
            }
        }
    }
    out
}
