use std::io::Write;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::redirect::Policy;
use reqwest::tls::TlsInfo;
use reqwest::{Client, Url};
use tokio::process::Command;
use crate::config::constants::{CACERTS_RELATIVE_PATH, CACERTS_STORE_PASSWORD, KEYTOOL_PROGRAM};
use crate::errors::{GateError, GateResult};
use crate::structs::config::pipeline_config::PipelineConfig;

const PEM_LINE_WIDTH: usize = 64;

/// Imports the Sonar server's TLS certificate into the JVM trust store so a
/// scanner talking to a self-signed server accepts it.
pub struct CertTruster {
    host_url: String,
    java_home: Option<String>,
    request_timeout: Duration,
}

impl CertTruster {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            host_url: config.server.host.clone(),
            java_home: std::env::var("JAVA_HOME").ok().filter(|v| !v.is_empty()),
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        }
    }

    pub fn with_java_home(mut self, java_home: Option<&str>) -> Self {
        self.java_home = java_home.map(|s| s.to_string());
        self
    }

    /// Host name (or IP literal) of the configured server, which is also the keystore alias.
    pub fn host_name(&self) -> GateResult<String> {
        let url = self.parsed_url()?;
        url.host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
            .ok_or_else(|| {
                GateError::config_error(&format!("Sonar host URL '{}' has no host", self.host_url), Some("server.host"), None)
            })
    }

    pub fn keystore_path(&self) -> GateResult<PathBuf> {
        let java_home = self.java_home.as_deref().ok_or_else(|| {
            GateError::config_error(
                "JAVA_HOME is not set, so the JVM trust store cannot be located",
                Some("JAVA_HOME"),
                Some("Point JAVA_HOME at the JDK used by sonar-scanner"),
            )
        })?;
        Ok(Path::new(java_home).join(CACERTS_RELATIVE_PATH))
    }

    pub fn build_args(alias: &str, cert_file: &Path, keystore: &Path) -> Vec<String> {
        vec![
            "-importcert".to_string(),
            "-alias".to_string(),
            alias.to_string(),
            "-file".to_string(),
            cert_file.display().to_string(),
            "-noprompt".to_string(),
            "-keystore".to_string(),
            keystore.display().to_string(),
            "-storepass".to_string(),
            CACERTS_STORE_PASSWORD.to_string(),
        ]
    }

    pub fn to_pem(der: &[u8]) -> String {
        let encoded = STANDARD.encode(der);
        let mut pem = String::from("-----BEGIN CERTIFICATE-----\n");
        for chunk in encoded.as_bytes().chunks(PEM_LINE_WIDTH) {
            pem.push_str(&String::from_utf8_lossy(chunk));
            pem.push('\n');
        }
        pem.push_str("-----END CERTIFICATE-----\n");
        pem
    }

    /// Subject CN and SAN entries sit verbatim in the DER body: DNS names as
    /// ASCII, IP addresses as raw octets.
    pub fn names_host(der: &[u8], host: &str) -> bool {
        let needle = match host.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) => ip.octets().to_vec(),
            Ok(IpAddr::V6(ip)) => ip.octets().to_vec(),
            Err(_) => host.as_bytes().to_vec(),
        };
        !needle.is_empty() && der.windows(needle.len()).any(|w| w.eq_ignore_ascii_case(&needle))
    }

    pub async fn run(&self) -> GateResult<()> {
        let host = self.host_name()?;
        if self.parsed_url()?.scheme() != "https" {
            return Err(GateError::config_error(
                &format!("Certificate trust needs an https host, got '{}'", self.host_url),
                Some("scanner.trust_server_cert"),
                Some("Use an https:// Sonar host or turn trust_server_cert off"),
            ));
        }
        let keystore = self.keystore_path()?;

        log::info!("🔐 Trying to trust certificate for: {}", host);
        let der = self.fetch_certificate(&host).await?;
        if !Self::names_host(&der, &host) {
            return Err(self.trust_error(&host, "the certificate presented by the server does not name this host"));
        }

        let mut cert_file = tempfile::Builder::new()
            .prefix("sonar-cert")
            .suffix(".pem")
            .tempfile()
            .map_err(|e| GateError::Io {
                operation: "creating certificate file".to_string(),
                reason: e.to_string(),
            })?;
        cert_file
            .write_all(Self::to_pem(&der).as_bytes())
            .map_err(|e| GateError::Io {
                operation: format!("writing {}", cert_file.path().display()),
                reason: e.to_string(),
            })?;

        let args = Self::build_args(&host, cert_file.path(), &keystore);
        log::debug!("==> Executing: {} {}", KEYTOOL_PROGRAM, args.join(" ").replace(CACERTS_STORE_PASSWORD, "****"));

        let status = Command::new(KEYTOOL_PROGRAM)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.trust_error(&host, &format!("could not start '{}': {}", KEYTOOL_PROGRAM, e)))?;

        if !status.success() {
            let code = status.code().map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string());
            return Err(self.trust_error(&host, &format!("{} exited with {}", KEYTOOL_PROGRAM, code)));
        }

        log::info!("✅ Certificate for {} added to {}", host, keystore.display());
        Ok(())
    }

    async fn fetch_certificate(&self, host: &str) -> GateResult<Vec<u8>> {
        // Validation is off: this certificate is not trusted yet.
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .tls_info(true)
            .redirect(Policy::none())
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| GateError::network_error("building HTTP client", None, &e.to_string()))?;

        let response = client
            .get(&self.host_url)
            .send()
            .await
            .map_err(|e| GateError::network_error("certificate retrieval", Some(&self.host_url), &e.to_string()))?;

        response
            .extensions()
            .get::<TlsInfo>()
            .and_then(|info| info.peer_certificate())
            .map(|der| der.to_vec())
            .ok_or_else(|| self.trust_error(host, "the server presented no certificate"))
    }

    fn parsed_url(&self) -> GateResult<Url> {
        Url::parse(&self.host_url).map_err(|e| {
            GateError::config_error(&format!("Invalid Sonar host URL '{}': {}", self.host_url, e), Some("server.host"), None)
        })
    }

    fn trust_error(&self, host: &str, reason: &str) -> GateError {
        GateError::CertificateTrust {
            host: host.to_string(),
            reason: reason.to_string(),
        }
    }
}
