//! Sequential publishing of records to the secret-storage service.

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use aws_config::Region;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use tracing::debug;

use crate::error::Error;
use crate::format::{self, OutputMode};
use crate::record::SecretRecord;

/// The one operation this tool needs from a secret-storage service.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    /// Create a secret and return the identifier the service assigned to it.
    async fn create_secret(&self, secret: &SecretRecord) -> Result<String>;
}

/// AWS Secrets Manager client.
pub struct AwsSecretsClient {
    client: SecretsManagerClient,
}

impl AwsSecretsClient {
    /// Build a client from the default AWS credential chain, optionally
    /// pinning the region.
    pub async fn new(region: Option<String>) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        Ok(Self {
            client: SecretsManagerClient::new(&config),
        })
    }
}

#[async_trait::async_trait]
impl SecretStore for AwsSecretsClient {
    async fn create_secret(&self, secret: &SecretRecord) -> Result<String> {
        debug!(name = %secret.name, "creating secret in AWS Secrets Manager");

        let mut request = self
            .client
            .create_secret()
            .name(&secret.name)
            .secret_string(&secret.value);
        if !secret.description.is_empty() {
            request = request.description(&secret.description);
        }

        let response = request
            .send()
            .await
            .context("CreateSecret call failed")?;
        response
            .arn()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("CreateSecret response carried no ARN"))
    }
}

/// Publish every record in file order, one synchronous call at a time,
/// writing each record's output line as soon as its identifier comes back.
///
/// Stops at the first failure; secrets created before that point stay
/// created and their lines have already been written.
pub async fn publish_all<W: Write>(
    store: &dyn SecretStore,
    secrets: &[SecretRecord],
    mode: OutputMode,
    out: &mut W,
) -> Result<(), Error> {
    for secret in secrets {
        let arn = store
            .create_secret(secret)
            .await
            .map_err(|source| Error::Publish {
                name: secret.name.clone(),
                source,
            })?;
        writeln!(out, "{}", format::render(mode, &secret.name, &arn)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory stand-in for Secrets Manager, failing on one chosen name.
    struct FakeStore {
        fail_on: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                fail_on,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn arn_for(name: &str) -> String {
            format!("arn:aws:secretsmanager:us-east-1:123456789012:secret:{name}-AbCdEf")
        }
    }

    #[async_trait::async_trait]
    impl SecretStore for FakeStore {
        async fn create_secret(&self, secret: &SecretRecord) -> Result<String> {
            self.calls.lock().unwrap().push(secret.name.clone());
            if self.fail_on == Some(secret.name.as_str()) {
                anyhow::bail!("access denied");
            }
            Ok(Self::arn_for(&secret.name))
        }
    }

    fn record(name: &str) -> SecretRecord {
        SecretRecord {
            name: name.to_string(),
            value: "v".to_string(),
            description: String::new(),
        }
    }

    fn lines(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn writes_one_arn_per_record_in_order() {
        let store = FakeStore::new(None);
        let secrets: Vec<_> = ["a", "b", "c"].into_iter().map(record).collect();
        let mut out = Vec::new();

        publish_all(&store, &secrets, OutputMode::Arn, &mut out)
            .await
            .unwrap();

        assert_eq!(
            lines(&out),
            vec![
                FakeStore::arn_for("a"),
                FakeStore::arn_for("b"),
                FakeStore::arn_for("c"),
            ]
        );
        assert_eq!(*store.calls.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn stops_at_first_failure_and_names_the_record() {
        let store = FakeStore::new(Some("c"));
        let secrets: Vec<_> = ["a", "b", "c", "d", "e"].into_iter().map(record).collect();
        let mut out = Vec::new();

        let err = publish_all(&store, &secrets, OutputMode::Arn, &mut out)
            .await
            .unwrap_err();

        match err {
            Error::Publish { name, .. } => assert_eq!(name, "c"),
            other => panic!("expected publish error, got {other:?}"),
        }
        // Remote calls happened for the first three records only, and the
        // two successes were already printed.
        assert_eq!(*store.calls.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(lines(&out).len(), 2);
    }

    #[tokio::test]
    async fn task_definition_mode_writes_json_lines() {
        let store = FakeStore::new(None);
        let secrets = vec![record("db/password")];
        let mut out = Vec::new();

        publish_all(&store, &secrets, OutputMode::TaskDefinition, &mut out)
            .await
            .unwrap();

        let arn = FakeStore::arn_for("db/password");
        assert_eq!(
            lines(&out),
            vec![format!("{{\"name\":\"PASSWORD\",\"valueFrom\":\"{arn}\"}}")]
        );
    }
}
