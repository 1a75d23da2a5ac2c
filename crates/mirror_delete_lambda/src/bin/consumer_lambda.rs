use aws_sdk_s3::operation::RequestId;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use mirror_delete_lambda::adapters::object_store::ObjectRemover;
use mirror_delete_lambda::adapters::redelivery::RedeliveryScheduler;
use mirror_delete_lambda::handlers::consumer::{
    batch_response, decode_queue_records, handle_record_batch, is_sqs_event, ConsumerConfig,
};
use mirror_delete_lambda::runtime::contract::DeleteReceipt;
use serde_json::Value;

struct S3ObjectRemover {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl ObjectRemover for S3ObjectRemover {
    fn delete_object(&self, key: &str) -> Result<DeleteReceipt, String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .delete_object()
                    .bucket(bucket)
                    .key(object_key)
                    .send()
                    .await
                    .map(|output| DeleteReceipt {
                        request_id: output.request_id().map(str::to_string),
                        // The SDK strips the raw response on success; 204 is
                        // the operation's documented success status.
                        http_status_code: 204,
                    })
                    .map_err(|error| format!("failed to delete object from s3: {error}"))
            })
        })
    }
}

struct SqsRedeliveryScheduler {
    queue_url: String,
    sqs_client: aws_sdk_sqs::Client,
}

impl RedeliveryScheduler for SqsRedeliveryScheduler {
    fn schedule_redelivery(&self, receipt_handle: &str, delay_seconds: u32) -> Result<(), String> {
        let queue_url = self.queue_url.clone();
        let handle = receipt_handle.to_string();
        let client = self.sqs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .change_message_visibility()
                    .queue_url(queue_url)
                    .receipt_handle(handle)
                    .visibility_timeout(delay_seconds as i32)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to schedule redelivery: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    if !is_sqs_event(&event.payload) {
        return Err(Error::from("expected an SQS event payload"));
    }

    let target_bucket = std::env::var("MIRROR_TARGET_BUCKET")
        .map_err(|_| Error::from("MIRROR_TARGET_BUCKET must be configured"))?;
    let queue_url = std::env::var("MIRROR_QUEUE_URL")
        .map_err(|_| Error::from("MIRROR_QUEUE_URL must be configured"))?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let remover = S3ObjectRemover {
        bucket: target_bucket.clone(),
        s3_client: aws_sdk_s3::Client::new(&aws_config),
    };
    let scheduler = SqsRedeliveryScheduler {
        queue_url,
        sqs_client: aws_sdk_sqs::Client::new(&aws_config),
    };

    let records = decode_queue_records(&event.payload).map_err(Error::from)?;
    let config = ConsumerConfig { target_bucket };
    let outcome = handle_record_batch(&records, &config, &remover, &scheduler);

    serde_json::to_value(batch_response(&outcome))
        .map_err(|error| Error::from(format!("failed to serialize batch response: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
