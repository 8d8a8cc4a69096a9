use crate::infra::Workspace;
use clap::{ArgGroup, Args};
use recruit_desk::error::AppError;
use recruit_desk::workflows::directory::{
    EmployeeQuery, EmployeeRecord, EmployerRecord, SearchNotice, SearchOutcome,
};
use recruit_desk::workflows::hiring::{
    HireRequest, RequestCounts, ResponseAction, ResponseReceipt, StatusFilter,
};
use recruit_desk::workflows::ids::{EmployeeId, EmployerId, RequestId};

#[derive(Args, Debug, Default)]
pub(crate) struct RequestListArgs {
    /// all, pending, accepted or rejected
    #[arg(long, default_value = "all")]
    pub(crate) status: StatusFilter,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("decision").required(true).args(["accept", "reject"])))]
pub(crate) struct RespondArgs {
    /// Hire request to respond to
    pub(crate) request_id: i64,
    /// Accept the request
    #[arg(long)]
    pub(crate) accept: bool,
    /// Reject the request
    #[arg(long)]
    pub(crate) reject: bool,
    /// Message sent back to the employer
    #[arg(long)]
    pub(crate) message: String,
}

impl RespondArgs {
    fn action(&self) -> ResponseAction {
        if self.accept {
            ResponseAction::Accept
        } else {
            ResponseAction::Reject
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct EmployeeSearchArgs {
    /// Free-text terms; every term must match some column
    pub(crate) query: Vec<String>,
    /// Maximum rows requested from the backend (defaults to BACKEND_EMPLOYEE_LIMIT)
    #[arg(long)]
    pub(crate) limit: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EmployerSearchArgs {
    /// Free-text terms; every term must match some column
    pub(crate) query: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DeleteArgs {
    /// Backend id of the row to delete
    pub(crate) id: i64,
    /// Confirm the delete; it cannot be undone
    #[arg(long)]
    pub(crate) yes: bool,
}

pub(crate) async fn run_request_list(args: RequestListArgs) -> Result<(), AppError> {
    let workspace = Workspace::from_env()?;
    workspace.requests.load().await?;

    let rows = workspace.requests.filter_by_status(args.status);
    render_request_list(args.status, workspace.requests.counts(), &rows);
    Ok(())
}

pub(crate) async fn run_request_respond(args: RespondArgs) -> Result<(), AppError> {
    let workspace = Workspace::from_env()?;
    workspace.requests.load().await?;

    let receipt = workspace
        .requests
        .respond(RequestId(args.request_id), args.action(), &args.message)
        .await?;
    println!("{}", describe_receipt(&receipt));
    Ok(())
}

pub(crate) async fn run_employee_search(args: EmployeeSearchArgs) -> Result<(), AppError> {
    let workspace = Workspace::from_env()?;
    let query = match args.limit {
        Some(limit) => EmployeeQuery::with_limit(limit),
        None => workspace.directory.default_query().clone(),
    };
    workspace.directory.load_employees(&query).await?;

    let outcome = workspace.directory.search_employees(&args.query.join(" "));
    println!("{}", describe_notice(&outcome.notice));
    for row in &outcome.rows {
        println!("{}", describe_employee(row));
    }
    Ok(())
}

pub(crate) async fn run_employer_search(args: EmployerSearchArgs) -> Result<(), AppError> {
    let workspace = Workspace::from_env()?;
    workspace.directory.load_employers().await?;

    let outcome: SearchOutcome<EmployerRecord> =
        workspace.directory.search_employers(&args.query.join(" "));
    println!("{}", describe_notice(&outcome.notice));
    for row in &outcome.rows {
        println!("{}", describe_employer(row));
    }
    Ok(())
}

pub(crate) async fn run_employee_delete(args: DeleteArgs) -> Result<(), AppError> {
    if !args.yes {
        println!("{}", unconfirmed_delete("employee", args.id));
        return Ok(());
    }
    let workspace = Workspace::from_env()?;
    workspace
        .directory
        .delete_employee(EmployeeId(args.id))
        .await?;
    println!("Employee {} deleted", args.id);
    Ok(())
}

pub(crate) async fn run_employer_delete(args: DeleteArgs) -> Result<(), AppError> {
    if !args.yes {
        println!("{}", unconfirmed_delete("employer", args.id));
        return Ok(());
    }
    let workspace = Workspace::from_env()?;
    workspace
        .directory
        .delete_employer(EmployerId(args.id))
        .await?;
    println!("Employer {} deleted", args.id);
    Ok(())
}

pub(crate) fn unconfirmed_delete(kind: &str, id: i64) -> String {
    format!("Deleting {kind} {id} cannot be undone; re-run with --yes to confirm")
}

pub(crate) async fn run_stats() -> Result<(), AppError> {
    let workspace = Workspace::from_env()?;
    let stats = workspace.directory.dashboard_stats().await?;

    println!("Admin overview ({})", workspace.config.backend.base_url);
    println!("  Registered applicants: {}", stats.total_employees);
    println!("  Active companies:      {}", stats.active_companies);
    println!("  Pending requests:      {}", stats.pending_requests);
    println!("  CVs processed:         {}", stats.cvs_processed);
    Ok(())
}

fn render_request_list(filter: StatusFilter, counts: RequestCounts, rows: &[HireRequest]) {
    println!(
        "Hire requests: {} total, {} pending, {} accepted, {} rejected",
        counts.total, counts.pending, counts.accepted, counts.rejected
    );
    println!("Showing: {} ({} rows)", filter.label(), rows.len());

    if rows.is_empty() {
        println!("  No hire requests found");
        return;
    }

    for request in rows {
        println!();
        for line in describe_request(request) {
            println!("{line}");
        }
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|text| !text.trim().is_empty()).unwrap_or("-")
}

pub(crate) fn describe_request(request: &HireRequest) -> Vec<String> {
    let parties = &request.parties;
    let mut lines = vec![
        format!(
            "#{} [{}] requested {}",
            request.request_id,
            request.status(),
            request.request_date.format("%Y-%m-%d %H:%M")
        ),
        format!(
            "  Employer: {} ({}, {})",
            or_dash(parties.employer_company.as_deref()),
            or_dash(parties.employer_username.as_deref()),
            or_dash(parties.employer_email.as_deref())
        ),
        format!(
            "  Candidate: {} | {} | {} | {} yrs",
            or_dash(parties.employee_name.as_deref()),
            or_dash(parties.employee_field.as_deref()),
            or_dash(parties.employee_location.as_deref()),
            or_dash(parties.employee_experience.as_deref())
        ),
        format!("  Message: {}", or_dash(Some(request.message.as_str()))),
    ];

    if let (Some(reply), Some(responded_at)) = (request.response_message(), request.response_date())
    {
        lines.push(format!(
            "  Response ({}): {}",
            responded_at.format("%Y-%m-%d %H:%M"),
            reply
        ));
    }
    lines
}

pub(crate) fn describe_receipt(receipt: &ResponseReceipt) -> String {
    let mut line = format!("Hire request {} {}", receipt.request_id, receipt.status);
    if !receipt.resynced {
        line.push_str(" (saved, but the request list could not be refreshed)");
    }
    line
}

pub(crate) fn describe_notice(notice: &SearchNotice) -> String {
    match notice {
        SearchNotice::Loading => "Nothing loaded yet".to_string(),
        SearchNotice::NoMatches { query } => format!("No results found for \"{query}\""),
        SearchNotice::Found { count: 1 } => "Found 1 result".to_string(),
        SearchNotice::Found { count } => format!("Found {count} results"),
    }
}

pub(crate) fn describe_employee(row: &EmployeeRecord) -> String {
    format!(
        "  #{} {} | {} | {} | {} | {}",
        row.employee_id,
        or_dash(row.name.as_deref()),
        or_dash(row.mobile_no.as_deref()),
        or_dash(row.field.as_deref()),
        or_dash(row.location.as_deref()),
        or_dash(row.nearest_route.as_deref())
    )
}

pub(crate) fn describe_employer(row: &EmployerRecord) -> String {
    format!(
        "  #{} {} ({}) | {} | {}",
        row.employer_id,
        or_dash(row.company_name.as_deref()),
        or_dash(row.username.as_deref()),
        or_dash(row.email.as_deref()),
        or_dash(row.phone.as_deref())
    )
}
