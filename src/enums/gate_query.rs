#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateQuery {
    Analysis {
        analysis_id: String,
    },
    Project {
        project_key: String,
        branch: Option<String>,
    },
}

impl GateQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        match self {
            GateQuery::Analysis { analysis_id } => vec![("analysisId".to_string(), analysis_id.clone())],
            GateQuery::Project { project_key, branch } => {
                let mut params = vec![("projectKey".to_string(), project_key.clone())];
                if let Some(branch) = branch.as_ref().filter(|b| !b.is_empty()) {
                    params.push(("branch".to_string(), branch.clone()));
                }
                params
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            GateQuery::Analysis { analysis_id } => format!("analysis {}", analysis_id),
            GateQuery::Project { project_key, branch: Some(branch) } => format!("project {} (branch {})", project_key, branch),
            GateQuery::Project { project_key, branch: None } => format!("project {}", project_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_query_skips_empty_branch() {
        let query = GateQuery::Project { project_key: "org:app".to_string(), branch: Some(String::new()) };
        assert_eq!(query.to_params(), vec![("projectKey".to_string(), "org:app".to_string())]);
    }

    #[test]
    fn project_query_includes_branch() {
        let query = GateQuery::Project { project_key: "org:app".to_string(), branch: Some("develop".to_string()) };
        assert_eq!(query.to_params().len(), 2);
        assert_eq!(query.to_params()[1].1, "develop");
    }
}
