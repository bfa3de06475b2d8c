//! End-to-end retrieval over the built-in corpus with the offline encoder

use simplerag_core::{
    Corpus, Encoder, FlatL2Index, HashedEncoder, RagError, Retriever, RetrieverConfig,
};

const APPLE: &str = "Apple is a common fruit, rich in vitamin C and dietary fiber";
const RICE: &str = "Rice is one of the most important food crops";

fn builtin_retriever() -> Retriever<HashedEncoder> {
    Retriever::ready(
        HashedEncoder::default(),
        Corpus::builtin(),
        RetrieverConfig::default(),
    )
    .unwrap()
}

#[test]
fn test_apple_rice_scenario() {
    let corpus = Corpus::new([APPLE, RICE]).unwrap();
    let retriever =
        Retriever::ready(HashedEncoder::default(), corpus, RetrieverConfig::default()).unwrap();

    let results = retriever.retrieve(APPLE, 1, 2.0).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 0);
    assert!(results[0].distance.abs() < 1e-5);
    assert_eq!(results[0].text, APPLE);
}

#[test]
fn test_every_document_finds_itself() {
    let encoder = HashedEncoder::default();
    let corpus = Corpus::builtin();
    let embeddings = encoder.encode(&corpus.texts()).unwrap();

    let mut index = FlatL2Index::new(encoder.dimension());
    index.build(&embeddings).unwrap();

    for doc in corpus.documents() {
        let hits = index.search(&embeddings[doc.id], 1).unwrap();
        assert_eq!(hits[0].id, doc.id, "self-match failed for {:?}", doc.text);
        assert!(hits[0].distance.abs() < 1e-5);
    }
}

#[test]
fn test_search_order_is_total() {
    let retriever = builtin_retriever();
    let encoder = retriever.encoder();

    for query in ["vitamin C", "protect eyesight", "lower blood pressure"] {
        let vector = encoder.encode_one(query).unwrap();
        let hits = retriever.index().search(&vector, retriever.corpus().len()).unwrap();
        assert_eq!(hits.len(), retriever.corpus().len());

        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
            if pair[0].distance == pair[1].distance {
                assert!(pair[0].id < pair[1].id);
            }
        }
    }
}

#[test]
fn test_retrieve_respects_k_and_threshold() {
    let retriever = builtin_retriever();

    for (k, threshold) in [(1, 2.0), (3, 1.5), (5, 2.0), (10, 1.0), (200, 4.0)] {
        let results = retriever
            .retrieve("Which foods can supplement iron?", k, threshold)
            .unwrap();
        assert!(results.len() <= k);
        assert!(results.iter().all(|r| r.distance < threshold));
        assert!(results
            .iter()
            .all(|r| retriever.corpus().get(r.id).map(|d| &d.text) == Some(&r.text)));
    }
}

#[test]
fn test_retrieve_is_idempotent() {
    let retriever = builtin_retriever();
    let first = retriever.retrieve("Which fruits contain vitamins?", 5, 2.0).unwrap();
    let second = retriever.retrieve("Which fruits contain vitamins?", 5, 2.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unrelated_query_shape() {
    let retriever = builtin_retriever();
    let query = "totally unrelated nonsense query xyz123";
    let answer = retriever.answer(query).unwrap();

    if retriever.retrieve_default(query).unwrap().is_empty() {
        assert_eq!(answer, format!("Sorry, no information related to '{}' was found.", query));
    } else {
        assert!(answer.starts_with("Based on the retrieved relevant documents:\n"));
        assert!(answer.ends_with(&format!(
            "The relevant information for the query '{}' is as shown above.",
            query
        )));
    }
}

#[test]
fn test_verbatim_query_answer_leads_with_match() {
    let retriever = builtin_retriever();
    let answer = retriever.answer(RICE).unwrap();
    let first_line = answer.lines().nth(1).unwrap();
    assert_eq!(first_line, RICE);
}

#[test]
fn test_punctuation_query_fails_alone() {
    let retriever = builtin_retriever();
    assert!(matches!(retriever.retrieve("???", 5, 2.0), Err(RagError::InvalidInput(_))));
    assert_eq!(retriever.retrieve(RICE, 1, 2.0).unwrap()[0].text, RICE);

    let mut unbuildable = Retriever::new(
        HashedEncoder::default(),
        Corpus::new([APPLE, "!!!"]).unwrap(),
        RetrieverConfig::default(),
    );
    assert!(matches!(unbuildable.build(), Err(RagError::InvalidInput(_))));
}

#[test]
fn test_empty_corpus_fails_deterministically() {
    let empty: Vec<&str> = vec![];
    assert!(matches!(Corpus::new(empty), Err(RagError::EmptyCorpus)));

    let mut index = FlatL2Index::new(8);
    assert!(matches!(index.build(&[]), Err(RagError::EmptyCorpus)));
    assert!(matches!(index.search(&[0.0; 8], 1), Err(RagError::IndexNotReady)));
}

#[test]
fn test_shared_between_threads() {
    let retriever = builtin_retriever();
    let expected = retriever.retrieve(RICE, 3, 2.0).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| retriever.retrieve(RICE, 3, 2.0).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
