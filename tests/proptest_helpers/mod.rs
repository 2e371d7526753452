#![allow(dead_code)]

use datecrawl::dataset::AssetPathPair;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A path segment free of the delimiter, separators and line breaks. Never
/// starts with a dot, so `.` and `..` cannot appear.
pub fn arb_segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_ ,()-][A-Za-z0-9_ ,.()-]{0,11}"
}

/// A relative asset path of one to four segments.
pub fn arb_relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_segment(), 1..=4).prop_map(|segments| segments.join("/"))
}

pub fn arb_pair() -> impl Strategy<Value = AssetPathPair> {
    ("/[a-z]{1,8}", arb_relative_path()).prop_map(|(root, rel)| {
        AssetPathPair::new(format!("{root}/{rel}"), rel).expect("generated pair is valid")
    })
}

pub fn arb_pairs(max: usize) -> impl Strategy<Value = Vec<AssetPathPair>> {
    prop::collection::vec(arb_pair(), 0..=max)
}

/// Any extension-like suffix, in any letter case.
pub fn arb_extension() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,5}"
}
