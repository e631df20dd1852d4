//! Behavioral tests for the batch streaming pipeline.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use serde_json::json;

use geobatch_core::{
    address_stream, GeoBatch, GeocodeProvider, GeocodeRequest, MemoryCache, ProviderError,
    ProviderResponse,
};
use geobatch_tests::{api_key_config, FnProvider, ScriptedProvider, StalledProvider};

#[tokio::test]
async fn create_stream_yields_one_element_per_address_in_order() {
    let stream = GeoBatch::create_stream(["Hamburg", "Berlin"]);
    let collected: Vec<String> = stream.collect().await;

    assert_eq!(collected, vec!["Hamburg", "Berlin"]);
}

#[tokio::test]
async fn geocodes_every_address_exactly_once() {
    let provider = Arc::new(FnProvider(
        |request: &GeocodeRequest| -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse::ok(vec![
                json!({"formatted_address": request.address}),
            ]))
        },
    ));
    let batch = GeoBatch::with_parts(&api_key_config(), provider, Arc::new(MemoryCache::new()))
        .expect("valid configuration");

    let records: Vec<_> = batch
        .geocode(address_stream(["Hamburg", "Berlin"]))
        .collect()
        .await;

    assert_eq!(records.len(), 2);

    let mut addresses: Vec<String> = records
        .into_iter()
        .map(|item| item.expect("resolution should succeed").address)
        .collect();
    addresses.sort();
    assert_eq!(addresses, vec!["Berlin", "Hamburg"]);
}

#[tokio::test]
async fn records_carry_address_and_location_keys() {
    let provider = Arc::new(ScriptedProvider::success(vec![json!("mockResult")]));
    let batch = GeoBatch::with_parts(&api_key_config(), provider, Arc::new(MemoryCache::new()))
        .expect("valid configuration");

    let records: Vec<_> = batch.geocode_addresses(["Hamburg"]).collect().await;
    let record = records[0].as_ref().expect("resolution should succeed");

    let rendered = serde_json::to_value(record).expect("record serializes");
    let object = rendered.as_object().expect("record is an object");
    assert_eq!(object.len(), 2);
    assert_eq!(object["address"], json!("Hamburg"));
    assert_eq!(object["location"], json!(["mockResult"]));
}

#[tokio::test]
async fn an_empty_input_collection_completes_with_zero_records() {
    let provider = Arc::new(ScriptedProvider::success(vec![json!("unused")]));
    let batch = GeoBatch::with_parts(&api_key_config(), provider, Arc::new(MemoryCache::new()))
        .expect("valid configuration");

    let records: Vec<_> = batch.geocode_addresses(Vec::<String>::new()).collect().await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn one_failing_address_does_not_abort_the_rest() {
    let provider = Arc::new(FnProvider(
        |request: &GeocodeRequest| -> Result<ProviderResponse, ProviderError> {
            if request.address == "Nowhere" {
                Ok(ProviderResponse::ok(Vec::new()))
            } else {
                Ok(ProviderResponse::ok(vec![json!(request.address.clone())]))
            }
        },
    ));
    let batch = GeoBatch::with_parts(&api_key_config(), provider, Arc::new(MemoryCache::new()))
        .expect("valid configuration");

    let records: Vec<_> = batch
        .geocode_addresses(["Hamburg", "Nowhere", "Berlin"])
        .collect()
        .await;

    assert_eq!(records.len(), 3);

    let failures: Vec<_> = records.iter().filter_map(|item| item.as_ref().err()).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].address, "Nowhere");
    assert_eq!(failures[0].error.to_string(), "No results found");

    let mut resolved: Vec<String> = records
        .iter()
        .filter_map(|item| item.as_ref().ok())
        .map(|record| record.address.clone())
        .collect();
    resolved.sort();
    assert_eq!(resolved, vec!["Berlin", "Hamburg"]);
}

#[tokio::test]
async fn dropping_the_stream_abandons_in_flight_resolutions() {
    let provider = Arc::new(StalledProvider::new());
    let config = api_key_config().with_queries_per_second(50.0);
    let batch = GeoBatch::with_parts(
        &config,
        Arc::clone(&provider) as Arc<dyn GeocodeProvider>,
        Arc::new(MemoryCache::new()),
    )
    .expect("valid configuration");

    let addresses: Vec<String> = (0..20).map(|index| format!("Address {index}")).collect();
    {
        let mut stream = std::pin::pin!(batch.geocode_addresses(addresses));
        assert!(futures::poll!(stream.next()).is_pending());
        assert!(provider.call_count() >= 1);
    }

    // Every admitted call was dropped with the stream; none may resolve or
    // report a result afterwards.
    let admitted = provider.call_count();
    assert_eq!(provider.abandoned_count(), admitted);

    // The buffered waits that never reached the provider held no rate
    // slots, so a fresh resolution is admitted within one throttle period
    // rather than one period per abandoned wait.
    let fresh = batch.geocode_address("Frankfurt");
    let _ = tokio::time::timeout(Duration::from_millis(200), fresh).await;
    assert_eq!(provider.call_count(), admitted + 1);
}

#[tokio::test]
async fn the_batch_reuses_the_cache_across_duplicate_addresses() {
    let provider = Arc::new(ScriptedProvider::success(vec![json!("mockResult")]));
    let batch = GeoBatch::with_parts(
        &api_key_config(),
        Arc::clone(&provider) as Arc<dyn GeocodeProvider>,
        Arc::new(MemoryCache::new()),
    )
    .expect("valid configuration");

    // Sequential calls so the first resolution lands in the cache before
    // the duplicate is attempted.
    batch
        .geocode_address("Hamburg")
        .await
        .expect("first resolution should succeed");

    let records: Vec<_> = batch.geocode_addresses(["Hamburg"]).collect().await;
    assert_eq!(records.len(), 1);
    assert!(records[0].is_ok());
    assert_eq!(provider.call_count(), 1);
}
