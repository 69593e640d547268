use serde::{Deserialize, Serialize};

/// A certificate as stored by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_name: String,
    pub father_name: String,
    pub date_of_birth: String,
    pub certificate_number: String,
    pub roll_no: String,
    pub passing_year: String,
    #[serde(default)]
    pub course_of_duration: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub created_at: String,
}

impl CertificateRecord {
    /// The eight client-owned fields, without `id` and `created_at`.
    pub fn input(&self) -> CertificateInput {
        CertificateInput {
            student_name: self.student_name.clone(),
            father_name: self.father_name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            certificate_number: self.certificate_number.clone(),
            roll_no: self.roll_no.clone(),
            passing_year: self.passing_year.clone(),
            course_of_duration: self.course_of_duration.clone(),
            course_name: self.course_name.clone(),
        }
    }
}

/// Body of `POST /certificate/create`. Has no identifier or timestamp on
/// purpose: those belong to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInput {
    pub student_name: String,
    pub father_name: String,
    pub date_of_birth: String,
    pub certificate_number: String,
    pub roll_no: String,
    pub passing_year: String,
    pub course_of_duration: String,
    pub course_name: String,
}

impl CertificateInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::StudentName => &self.student_name,
            FormField::FatherName => &self.father_name,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::CertificateNumber => &self.certificate_number,
            FormField::RollNo => &self.roll_no,
            FormField::PassingYear => &self.passing_year,
            FormField::CourseOfDuration => &self.course_of_duration,
            FormField::CourseName => &self.course_name,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::StudentName => &mut self.student_name,
            FormField::FatherName => &mut self.father_name,
            FormField::DateOfBirth => &mut self.date_of_birth,
            FormField::CertificateNumber => &mut self.certificate_number,
            FormField::RollNo => &mut self.roll_no,
            FormField::PassingYear => &mut self.passing_year,
            FormField::CourseOfDuration => &mut self.course_of_duration,
            FormField::CourseName => &mut self.course_name,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    StudentName,
    FatherName,
    DateOfBirth,
    CertificateNumber,
    RollNo,
    PassingYear,
    CourseOfDuration,
    CourseName,
}

impl FormField {
    /// Form order.
    pub const ALL: [FormField; 8] = [
        FormField::StudentName,
        FormField::FatherName,
        FormField::DateOfBirth,
        FormField::CertificateNumber,
        FormField::RollNo,
        FormField::PassingYear,
        FormField::CourseOfDuration,
        FormField::CourseName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::StudentName => "Student Name",
            FormField::FatherName => "Father's Name",
            FormField::DateOfBirth => "Date of Birth",
            FormField::CertificateNumber => "Certificate Number",
            FormField::RollNo => "Roll Number",
            FormField::PassingYear => "Passing Year",
            FormField::CourseOfDuration => "Course Duration",
            FormField::CourseName => "Course Name",
        }
    }
}

/// Identity fields accepted by `GET /certificate/getOne`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub student_name: String,
    pub father_name: String,
    pub date_of_birth: String,
    pub certificate_number: String,
}

impl SearchQuery {
    pub fn get(&self, field: SearchField) -> &str {
        match field {
            SearchField::StudentName => &self.student_name,
            SearchField::FatherName => &self.father_name,
            SearchField::DateOfBirth => &self.date_of_birth,
            SearchField::CertificateNumber => &self.certificate_number,
        }
    }

    pub fn set(&mut self, field: SearchField, value: impl Into<String>) {
        let slot = match field {
            SearchField::StudentName => &mut self.student_name,
            SearchField::FatherName => &mut self.father_name,
            SearchField::DateOfBirth => &mut self.date_of_birth,
            SearchField::CertificateNumber => &mut self.certificate_number,
        };
        *slot = value.into();
    }

    /// Query string pairs in wire order.
    pub fn params(&self) -> [(&'static str, &str); 4] {
        [
            ("studentName", self.student_name.as_str()),
            ("fatherName", self.father_name.as_str()),
            ("dateOfBirth", self.date_of_birth.as_str()),
            ("certificateNumber", self.certificate_number.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    StudentName,
    FatherName,
    DateOfBirth,
    CertificateNumber,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::StudentName,
        SearchField::FatherName,
        SearchField::DateOfBirth,
        SearchField::CertificateNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchField::StudentName => "Student Name",
            SearchField::FatherName => "Father's Name",
            SearchField::DateOfBirth => "Date of Birth",
            SearchField::CertificateNumber => "Certificate Number",
        }
    }
}
