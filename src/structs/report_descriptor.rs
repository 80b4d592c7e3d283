/// The scanner's pointer to the server-side processing of its upload,
/// read from `report-task.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDescriptor {
    pub project_key: String,
    pub server_url: String,
    pub task_id: String,
    pub task_url: String,
    pub dashboard_url: Option<String>,
    pub branch: Option<String>,
    pub server_version: Option<String>,
}
