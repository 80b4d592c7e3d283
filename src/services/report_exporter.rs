use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use crate::config::constants::REPORT_SUITES_NAME;
use crate::errors::{GateError, GateResult};
use crate::structs::gate::condition::Condition;

/// Renders gate conditions as a JUnit report, one test case per condition
/// in server order.
pub struct ReportExporter {
    project_key: String,
}

impl ReportExporter {
    pub fn new(project_key: &str) -> Self {
        Self {
            project_key: project_key.to_string(),
        }
    }

    pub fn render(&self, conditions: &[Condition]) -> GateResult<String> {
        // Failing conditions are counted once, under `errors`.
        let errors = conditions.iter().filter(|c| c.is_failing()).count().to_string();
        let tests = conditions.len().to_string();

        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        let xml_error = |e: quick_xml::Error| GateError::ReportWrite {
            path: "<memory>".to_string(),
            reason: e.to_string(),
        };

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;

        let mut suites = BytesStart::new("testsuites");
        suites.push_attribute(("name", REPORT_SUITES_NAME));
        suites.push_attribute(("tests", tests.as_str()));
        suites.push_attribute(("errors", errors.as_str()));
        writer.write_event(Event::Start(suites)).map_err(xml_error)?;

        let mut suite = BytesStart::new("testsuite");
        suite.push_attribute(("name", self.project_key.as_str()));
        suite.push_attribute(("tests", tests.as_str()));
        suite.push_attribute(("errors", errors.as_str()));
        writer.write_event(Event::Start(suite)).map_err(xml_error)?;

        for condition in conditions {
            let mut case = BytesStart::new("testcase");
            case.push_attribute(("name", condition.metric_key.as_str()));
            case.push_attribute(("classname", self.project_key.as_str()));

            if condition.is_failing() {
                let message = condition.violation_message();
                writer.write_event(Event::Start(case)).map_err(xml_error)?;
                let mut failure = BytesStart::new("failure");
                failure.push_attribute(("message", message.as_str()));
                failure.push_attribute(("type", condition.status.as_str()));
                writer.write_event(Event::Empty(failure)).map_err(xml_error)?;
                writer.write_event(Event::End(BytesEnd::new("testcase"))).map_err(xml_error)?;
            } else {
                writer.write_event(Event::Empty(case)).map_err(xml_error)?;
            }
        }

        writer.write_event(Event::End(BytesEnd::new("testsuite"))).map_err(xml_error)?;
        writer.write_event(Event::End(BytesEnd::new("testsuites"))).map_err(xml_error)?;

        String::from_utf8(writer.into_inner().into_inner()).map_err(|e| GateError::ReportWrite {
            path: "<memory>".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn export(&self, conditions: &[Condition], path: &Path) -> GateResult<PathBuf> {
        let xml = self.render(conditions)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GateError::ReportWrite {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        fs::write(path, xml).map_err(|e| GateError::ReportWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        log::info!("🧾 Quality gate report written to {}", path.display());
        Ok(path.to_path_buf())
    }
}
