use harness::{WriteClient, WriteError, WriteFuture, WriteOptions};
use tokio::time::Instant;
use tonic::{Code, Status, transport::Channel};

use crate::datastore::{SetOptions, SetRequest, SetResponse, datastore_client::DatastoreClient};

/// [`WriteClient`] over one tonic channel. Calls clone the generated client,
/// which multiplexes onto the same connection.
#[derive(Debug, Clone)]
pub struct GrpcWriteClient {
    inner: DatastoreClient<Channel>,
}

impl GrpcWriteClient {
    pub async fn connect(addr: String) -> Result<Self, tonic::transport::Error> {
        let inner = DatastoreClient::connect(addr).await?;
        Ok(Self { inner })
    }

    pub fn client(&self) -> DatastoreClient<Channel> {
        self.inner.clone()
    }
}

pub fn set_request(key: &str, value: &[u8], options: &WriteOptions) -> SetRequest {
    SetRequest {
        key: key.to_string(),
        value: value.to_vec(),
        options: Some(SetOptions {
            ttl: i64::try_from(options.ttl.as_secs()).unwrap_or(i64::MAX),
            preserve_history: options.preserve_history,
        }),
    }
}

/// Wraps `set` in a request whose gRPC timeout is the time left until `deadline`.
fn timed_request(set: SetRequest, deadline: Instant, now: Instant) -> tonic::Request<SetRequest> {
    let mut request = tonic::Request::new(set);
    request.set_timeout(deadline.saturating_duration_since(now));
    request
}

fn acknowledged(response: SetResponse) -> Result<(), WriteError> {
    if response.success {
        Ok(())
    } else {
        Err(WriteError::Unacknowledged)
    }
}

fn write_error(status: Status) -> WriteError {
    match status.code() {
        Code::DeadlineExceeded => WriteError::DeadlineExceeded,
        code => WriteError::Remote(format!("{:?}: {}", code, status.message())),
    }
}

impl WriteClient for GrpcWriteClient {
    fn write<'a>(
        &'a self,
        key: &'a str,
        value: &'a [u8],
        options: &'a WriteOptions,
        deadline: Instant,
    ) -> WriteFuture<'a> {
        Box::pin(async move {
            let mut client = self.inner.clone();
            let request = timed_request(set_request(key, value, options), deadline, Instant::now());

            let response = client.set(request).await.map_err(write_error)?;
            acknowledged(response.into_inner())
        })
    }
}
