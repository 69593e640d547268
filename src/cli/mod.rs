pub mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{FormField, NewAdminRequest, SearchField};
use crate::services::{
    AdminSession, CertificateForm, CertificateList, Confirm, SubmitOutcome, export_workbook,
};
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Issue and verify Tally Expert certificates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as an admin and keep the session token for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Admin account management
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// List certificates, ten per page
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Add a certificate
    Add(CertificateArgs),
    /// Edit a certificate
    Edit {
        id: String,
        #[command(flatten)]
        fields: CertificateArgs,
    },
    /// Delete a certificate
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Export all certificates to an Excel workbook
    Export {
        /// Directory for the workbook (defaults to CERTDESK_EXPORT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check a certificate against the registry; no login needed
    Verify(SearchArgs),
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Create another admin account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "admin")]
        role: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct CertificateArgs {
    #[arg(long)]
    pub student_name: Option<String>,
    #[arg(long)]
    pub father_name: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: Option<String>,
    /// Suggested automatically for new certificates when omitted
    #[arg(long)]
    pub certificate_number: Option<String>,
    #[arg(long)]
    pub roll_no: Option<String>,
    #[arg(long)]
    pub passing_year: Option<String>,
    #[arg(long)]
    pub course_duration: Option<String>,
    #[arg(long)]
    pub course_name: Option<String>,
}

impl CertificateArgs {
    /// Copies every flag that was given onto the form.
    pub fn apply(self, form: &mut CertificateForm) {
        let values = [
            (FormField::StudentName, self.student_name),
            (FormField::FatherName, self.father_name),
            (FormField::DateOfBirth, self.date_of_birth),
            (FormField::CertificateNumber, self.certificate_number),
            (FormField::RollNo, self.roll_no),
            (FormField::PassingYear, self.passing_year),
            (FormField::CourseOfDuration, self.course_duration),
            (FormField::CourseName, self.course_name),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                form.set(field, value);
            }
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    #[arg(long, default_value = "")]
    pub student_name: String,
    #[arg(long, default_value = "")]
    pub father_name: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub date_of_birth: String,
    #[arg(long, default_value = "")]
    pub certificate_number: String,
}

/// Interactive yes/no prompt on stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!("failed to read confirmation: {}", e);
                false
            }
        }
    }
}

pub async fn run(state: &AppState, command: Command) -> Result<(), AppError> {
    match command {
        Command::Login { email, password } => {
            let mut session = state.session();
            let outcome = session.login(&email, &password).await?;
            let greeting = outcome
                .message
                .as_deref()
                .filter(|message| !message.trim().is_empty())
                .unwrap_or("Login successful");
            println!("{}. Welcome to the admin panel!", greeting.trim_end_matches('.'));
            match outcome.loaded {
                Ok(count) => println!("{} certificates loaded.", count),
                Err(e) => eprintln!("{}", e.user_message("Failed to load certificates")),
            }
        }
        Command::Logout => {
            state.session().logout()?;
            println!("You have been logged out successfully.");
        }
        Command::Admin {
            command: AdminCommand::Create { name, email, password, role },
        } => {
            let mut session = resume(state).await?;
            let admin = session
                .create_admin(&NewAdminRequest { name, email, password, role })
                .await?;
            println!("Admin account created: {} <{}> ({})", admin.name, admin.email, admin.role);
        }
        Command::List { page } => {
            let session = resume(state).await?;
            let list = CertificateList::new(session.certificates());
            print!("{}", render::list_view(&list.view(page)));
        }
        Command::Add(fields) => {
            let mut form = CertificateForm::new(state.number_generator());
            fields.apply(&mut form);
            let input = form.submit()?;

            let mut session = resume(state).await?;

            match session.submit(&input).await? {
                SubmitOutcome::Created(record) => {
                    form.complete_submission();
                    println!(
                        "Certificate for {} has been added successfully.",
                        record.student_name
                    );
                    print!("{}", render::record_details(&record));
                }
                SubmitOutcome::UpdateNotImplemented => print_update_stub(),
            }
        }
        Command::Edit { id, fields } => {
            let mut session = resume(state).await?;
            let record = session.begin_edit(&id)?;
            let mut form = CertificateForm::editing(&record, state.number_generator());
            fields.apply(&mut form);
            let input = match form.submit() {
                Ok(input) => input,
                Err(e) => {
                    session.cancel_edit();
                    return Err(e.into());
                }
            };

            match session.submit(&input).await? {
                SubmitOutcome::UpdateNotImplemented => print_update_stub(),
                SubmitOutcome::Created(record) => {
                    println!("Certificate for {} has been added.", record.student_name);
                }
            }
        }
        Command::Delete { id, yes } => {
            let mut session = resume(state).await?;
            let approve_all = |_: &str| true;
            let confirmer: &dyn Confirm = if yes { &approve_all } else { &StdinConfirm };

            let target = CertificateList::new(session.certificates())
                .request_delete(&id, confirmer);
            let student = session
                .certificates()
                .iter()
                .find(|record| record.id == id)
                .map(|record| record.student_name.clone());

            match (target, student) {
                (Some(target), Some(student)) => {
                    session.delete(&target).await?;
                    println!("Certificate for {} has been deleted.", student);
                }
                (None, Some(_)) => println!("Delete cancelled."),
                _ => return Err(AppError::NotFound(format!("certificate {}", id))),
            }
        }
        Command::Export { out } => {
            let session = resume(state).await?;
            let artifact = export_workbook(session.certificates(), Utc::now().date_naive())?;
            let dir = out.unwrap_or_else(|| state.config.export_dir.clone());
            std::fs::create_dir_all(&dir)?;
            let path = dir.join(&artifact.filename);
            std::fs::write(&path, &artifact.bytes)?;
            info!("workbook written to {}", path.display());
            println!("{} certificates exported to {}", artifact.rows, path.display());
        }
        Command::Verify(args) => {
            let mut flow = state.verification();
            flow.set(SearchField::StudentName, args.student_name);
            flow.set(SearchField::FatherName, args.father_name);
            flow.set(SearchField::DateOfBirth, args.date_of_birth);
            flow.set(SearchField::CertificateNumber, args.certificate_number);
            let outcome = flow.search().await?;
            print!("{}", render::verification(outcome));
        }
    }
    Ok(())
}

/// Text shown for an error that ended a command.
pub fn describe_error(err: &AppError) -> String {
    match err {
        AppError::Unauthorized => {
            "Your session has expired. Please log in again with `certdesk login`.".to_string()
        }
        AppError::NotLoggedIn => "Not logged in. Run `certdesk login` first.".to_string(),
        AppError::Validation(e) => format!("Invalid input: {}", e),
        AppError::Transport(_) => "Could not reach the certificate service.".to_string(),
        other => format!("Error: {}", other.user_message("The request failed")),
    }
}

async fn resume(state: &AppState) -> Result<AdminSession, AppError> {
    let mut session = state.session();
    if session.resume().await? {
        Ok(session)
    } else {
        Err(AppError::NotLoggedIn)
    }
}

fn print_update_stub() {
    println!("Update Not Implemented: certificate update functionality will be added soon.");
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::services::CertificateNumberGenerator;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_partial_fields() {
        let cli = Cli::try_parse_from([
            "certdesk",
            "add",
            "--student-name",
            "Asha Verma",
            "--course-duration",
            "6 Months",
        ])
        .expect("parse");

        let Command::Add(fields) = cli.command else {
            panic!("expected add");
        };
        let mut form = CertificateForm::new(CertificateNumberGenerator::default());
        fields.apply(&mut form);
        assert_eq!(form.get(FormField::StudentName), "Asha Verma");
        assert_eq!(form.get(FormField::CourseOfDuration), "6 Months");
        assert!(form.get(FormField::CertificateNumber).starts_with("TEC"));
        assert_eq!(form.get(FormField::RollNo), "");
    }

    #[test]
    fn unauthorized_points_back_to_login() {
        assert!(describe_error(&AppError::Unauthorized).contains("certdesk login"));
    }
}
