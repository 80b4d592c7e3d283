use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use crate::errors::{GateError, GateResult};
use crate::structs::report_descriptor::ReportDescriptor;

const PROJECT_KEY_FIELD: &str = "projectKey";
const SERVER_URL_FIELD: &str = "serverUrl";
const SERVER_URL_ALT_FIELD: &str = "serverURL";
const TASK_ID_FIELD: &str = "ceTaskId";
const TASK_URL_FIELD: &str = "ceTaskUrl";
const DASHBOARD_URL_FIELD: &str = "dashboardUrl";
const BRANCH_FIELD: &str = "branch";
const SERVER_VERSION_FIELD: &str = "serverVersion";

pub struct DescriptorParser {
    source: String,
}

impl DescriptorParser {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }

    /// Reads the descriptor at `path`. A missing file is `Ok(None)` unless `required`.
    pub fn load(path: &Path, required: bool) -> GateResult<Option<ReportDescriptor>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if required {
                    return Err(GateError::DescriptorMissing {
                        path: path.display().to_string(),
                    });
                }
                log::warn!("⚠️ No report descriptor at {}, continuing without it", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(GateError::Io {
                    operation: format!("reading {}", path.display()),
                    reason: e.to_string(),
                })
            }
        };

        let descriptor = Self::new(&path.display().to_string()).parse(&content)?;
        log::info!("📄 Report descriptor: project {} / task {}", descriptor.project_key, descriptor.task_id);
        Ok(Some(descriptor))
    }

    pub fn parse(&self, content: &str) -> GateResult<ReportDescriptor> {
        let mut fields: HashMap<String, String> = HashMap::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| GateError::descriptor_error(&self.source, index + 1, &format!("expected key=value, found '{}'", line)))?;

            let key = key.trim();
            if key.is_empty() {
                return Err(GateError::descriptor_error(&self.source, index + 1, "empty key"));
            }

            fields.insert(key.to_string(), self.unescape(value.trim(), index + 1)?);
        }

        let line_count = content.lines().count();
        let mut take = |key: &str| fields.remove(key).filter(|v| !v.is_empty());
        let require = |value: Option<String>, key: &str| {
            value.ok_or_else(|| GateError::descriptor_error(&self.source, line_count, &format!("missing required key '{}'", key)))
        };

        let project_key = take(PROJECT_KEY_FIELD);
        let server_url = take(SERVER_URL_FIELD).or_else(|| take(SERVER_URL_ALT_FIELD));
        let task_id = take(TASK_ID_FIELD);
        let task_url = take(TASK_URL_FIELD);
        let dashboard_url = take(DASHBOARD_URL_FIELD);
        let branch = take(BRANCH_FIELD);
        let server_version = take(SERVER_VERSION_FIELD);

        Ok(ReportDescriptor {
            project_key: require(project_key, PROJECT_KEY_FIELD)?,
            server_url: require(server_url, SERVER_URL_FIELD)?,
            task_id: require(task_id, TASK_ID_FIELD)?,
            task_url: require(task_url, TASK_URL_FIELD)?,
            dashboard_url,
            branch,
            server_version,
        })
    }

    /// Decodes properties-file escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`
    /// (surrogate pairs included), and `\x` as a literal `x` for anything else.
    fn unescape(&self, value: &str, line: usize) -> GateResult<String> {
        let mut result = String::with_capacity(value.len());
        let mut units: Vec<u16> = Vec::new();
        let mut chars = value.chars();

        while let Some(c) = chars.next() {
            if c != '\\' {
                self.flush_units(&mut units, &mut result, line)?;
                result.push(c);
                continue;
            }

            let Some(escaped) = chars.next() else {
                self.flush_units(&mut units, &mut result, line)?;
                result.push('\\');
                break;
            };

            if escaped == 'u' {
                let hex: String = chars.by_ref().take(4).collect();
                let unit = (hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .then(|| u16::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or_else(|| GateError::descriptor_error(&self.source, line, &format!("invalid unicode escape '\\u{}'", hex)))?;
                units.push(unit);
                continue;
            }

            self.flush_units(&mut units, &mut result, line)?;
            result.push(match escaped {
                't' => '\t',
                'n' => '\n',
                'r' => '\r',
                'f' => '\u{0c}',
                other => other,
            });
        }

        self.flush_units(&mut units, &mut result, line)?;
        Ok(result)
    }

    fn flush_units(&self, units: &mut Vec<u16>, out: &mut String, line: usize) -> GateResult<()> {
        for decoded in char::decode_utf16(units.drain(..)) {
            let c = decoded.map_err(|e| {
                GateError::descriptor_error(&self.source, line, &format!("unpaired surrogate \\u{:04x} in unicode escape", e.unpaired_surrogate()))
            })?;
            out.push(c);
        }
        Ok(())
    }
}
