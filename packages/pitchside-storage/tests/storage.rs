use pitchside_config::Qdrant;
use pitchside_storage::qdrant::QdrantStore;

fn cfg() -> Qdrant {
	Qdrant {
		url: "http://127.0.0.1:6334".to_string(),
		api_key: None,
		collection_prefix: "pitchside_".to_string(),
		vector_dim: 4,
	}
}

#[tokio::test]
async fn store_maps_namespaces_to_prefixed_collections() {
	let store = QdrantStore::new(&cfg()).expect("Failed to build store.");

	assert_eq!(store.collection_for("match_events"), "pitchside_match_events");
	assert_eq!(store.vector_dim, 4);
}

#[tokio::test]
async fn wrong_vector_length_is_rejected_before_io() {
	let store = QdrantStore::new(&cfg()).expect("Failed to build store.");
	let err = store
		.query("match_events", vec![0.0; 3], 5, &Default::default())
		.await
		.expect_err("dimension mismatch must fail");

	assert!(err.to_string().contains("expects 4"));
}
