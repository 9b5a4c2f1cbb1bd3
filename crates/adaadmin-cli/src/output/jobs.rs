//! Renderers for scheduler jobs.

use adaadmin_api_models::{JobListResponse, JobResultResponse, StatusResponse};

pub(crate) fn job_list_lines(reply: &JobListResponse) -> Vec<String> {
    let mut lines = vec!["Name             User        Status     Description".to_string()];
    for definition in &reply.job_definition {
        lines.push(String::new());
        lines.push(format!(
            "{:<15}  {:<8}    {:<8}   {}",
            definition.job.name, definition.job.user, definition.status, definition.job.description
        ));
        lines.push("  Executions:".to_string());
        lines.extend(definition.executions.iter().map(|execution| {
            format!(
                "    Id={:>8}   Started at {:>8} ended at {}",
                execution.id, execution.scheduled, execution.ended
            )
        }));
    }
    lines
}

pub(crate) fn job_start_lines(reply: &StatusResponse) -> Vec<String> {
    let status = &reply.status;
    vec![
        format!("Status message    : {}", status.message),
        format!("Job Name          : {}", status.name),
        format!("Execution ID      : {}", status.execution_id),
    ]
}

pub(crate) fn job_status_lines(reply: &StatusResponse) -> Vec<String> {
    vec![format!("Status message    : {}", reply.status.message)]
}

pub(crate) fn job_log_lines(reply: &JobResultResponse) -> Vec<String> {
    let result = &reply.job_result;
    vec![
        format!("JOB name     : {}", result.name),
        format!("JOB id       : {:.0}", result.id),
        format!("JOB started  : {}", result.scheduled),
        format!("JOB ended    : {}", result.ended),
        "Output started -------:".to_string(),
        format!(" {}", result.log),
        "Output ended -------".to_string(),
    ]
}
