//! Round trips against a real S3 API. Start LocalStack and run with `--ignored`.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use object_uploader::{
    testing::StaticFetcher, ObjectUploader, S3Connector, UploadConfig, UploaderError,
};
use uuid::Uuid;

/// Test configuration for LocalStack
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

struct TestContext {
    s3_client: S3Client,
    config: UploadConfig,
    uploader: ObjectUploader,
}

/// Creates a unique bucket and an uploader pointed at it
async fn setup_test() -> TestContext {
    let bucket = format!("test-uploads-{}", Uuid::new_v4());

    let credentials = Credentials::from_keys("test", "test", None);
    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(s3_config);

    s3_client
        .create_bucket()
        .bucket(&bucket)
        .send()
        .await
        .expect("Failed to create test bucket");

    TestContext {
        s3_client,
        config: UploadConfig::new(bucket, LOCALSTACK_ENDPOINT, "test", "test"),
        uploader: ObjectUploader::new(S3Connector::new(TEST_REGION), StaticFetcher::new()),
    }
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_upload_object_round_trip() {
    let ctx = setup_test().await;

    let url = ctx
        .uploader
        .upload_object(
            &ctx.config,
            "docs/readme.txt",
            Bytes::from_static(b"hello"),
            "text/plain",
        )
        .await
        .unwrap();

    assert_eq!(
        url,
        format!("http://localhost:4566/{}/docs/readme.txt", ctx.config.bucket)
    );

    let object = ctx
        .s3_client
        .get_object()
        .bucket(&ctx.config.bucket)
        .key("docs/readme.txt")
        .send()
        .await
        .unwrap();
    assert_eq!(object.content_type(), Some("text/plain"));
    assert_eq!(object.content_length(), Some(5));
    let body = object.body.collect().await.unwrap().into_bytes();
    assert_eq!(body.as_ref(), b"hello");

    // Path-style public URL is directly readable from LocalStack
    let downloaded = reqwest::get(&url).await.unwrap().bytes().await.unwrap();
    assert_eq!(downloaded.as_ref(), b"hello");
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_upload_image_overwrites_identical_payload() {
    let ctx = setup_test().await;
    let payload = Bytes::from(vec![9u8; 1024]);

    let first = ctx
        .uploader
        .upload_image(&ctx.config, payload.clone(), "")
        .await
        .unwrap();
    let second = ctx
        .uploader
        .upload_image(&ctx.config, payload, "")
        .await
        .unwrap();
    assert_eq!(first, second);

    let listing = ctx
        .s3_client
        .list_objects_v2()
        .bucket(&ctx.config.bucket)
        .send()
        .await
        .unwrap();
    assert_eq!(listing.key_count(), Some(1));

    let key = listing.contents()[0].key().unwrap().to_string();
    let head = ctx
        .s3_client
        .head_object()
        .bucket(&ctx.config.bucket)
        .key(&key)
        .send()
        .await
        .unwrap();
    assert_eq!(head.content_type(), Some("image/jpeg"));
}

#[tokio::test]
#[ignore = "requires LocalStack on localhost:4566"]
async fn test_missing_bucket_surfaces_upload_error() {
    let ctx = setup_test().await;
    let config = UploadConfig {
        bucket: format!("missing-{}", Uuid::new_v4()),
        ..ctx.config.clone()
    };

    let err = ctx
        .uploader
        .upload_object(&config, "k", Bytes::from_static(b"x"), "text/plain")
        .await
        .unwrap_err();

    assert!(matches!(err, UploaderError::Upload(_)));
}
