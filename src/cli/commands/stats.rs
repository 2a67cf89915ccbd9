use tabled::builder::Builder;

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::apply_table_style;
use crate::db::Priority;
use crate::service::TodoStatistics;

/// Show aggregate statistics
pub async fn show_stats(api_client: &ApiClient, format: &str) -> CliResult<String> {
    let response = api_client.get("/stats").send().await?;
    let stats: TodoStatistics = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&stats)?),
        _ => Ok(format_stats(&stats)),
    }
}

pub(crate) fn format_stats(stats: &TodoStatistics) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Total".to_string(), stats.total.to_string()]);
    builder.push_record(["Completed".to_string(), stats.completed.to_string()]);
    builder.push_record(["Pending".to_string(), stats.pending.to_string()]);
    builder.push_record([
        "Completion".to_string(),
        format!("{:.1}%", stats.completion_rate * 100.0),
    ]);
    for priority in Priority::ALL {
        builder.push_record([
            format!("Priority {}", priority),
            stats.by_priority.get(priority).to_string(),
        ]);
    }

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}
