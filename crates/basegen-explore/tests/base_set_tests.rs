use std::collections::{BTreeMap, BTreeSet};

use basegen_explore::{BaseSetGenerator, GenerateError, GenerateLimits, GeneratorConfig, NodeGen};
use basegen_ir::parse::parse_nodes;
use basegen_ir::{RandomDomain, SizeDomain, TestCase, Value, ValueNode};

fn int_node(exhaustive: Vec<i64>, min: i64, max: i64) -> ValueNode {
    ValueNode::int(exhaustive, RandomDomain::range(min, max))
}

#[test]
fn test_int_by_str_cross_product() {
    let nodes = vec![
        int_node(vec![0, 1], -10, 10),
        ValueNode::str("ab", vec![1], SizeDomain::range(0, 3)),
    ];
    let generator = BaseSetGenerator::new(nodes, GeneratorConfig::default()).unwrap();
    let base = generator.generate_base_set().unwrap();

    let expected: Vec<TestCase> = [(0, "a"), (0, "b"), (1, "a"), (1, "b")]
        .into_iter()
        .map(|(i, s)| TestCase::new(vec![Value::Int(i), Value::str(s)]))
        .collect();
    assert_eq!(base, expected);
}

#[test]
fn test_dict_exhaustive_values() {
    let node = ValueNode::dict(
        int_node(vec![1, 2], 0, 5),
        ValueNode::str("x", vec![1], SizeDomain::range(1, 1)),
        vec![0, 1],
        SizeDomain::range(0, 2),
    );
    let values = node
        .generate_exhaustive_values(&GenerateLimits::default())
        .unwrap();

    let single = |k: i64| Value::Dict(BTreeMap::from([(Value::Int(k), Value::str("x"))]));
    let expected = BTreeSet::from([Value::Dict(BTreeMap::new()), single(1), single(2)]);
    assert_eq!(values, expected);
}

#[test]
fn test_random_values_respect_size_domain() {
    let node = ValueNode::dict(
        int_node(vec![], 0, 9),
        ValueNode::bool(vec![], vec![true, false]),
        vec![],
        SizeDomain::values(vec![2, 4]),
    );
    let mut rng = basegen_explore::rng::stage_rng(3, 0);
    let limits = GenerateLimits::default();
    for _ in 0..100 {
        let value = node.generate_random_value(&mut rng, &limits).unwrap();
        assert!(matches!(value.len(), Some(2) | Some(4)));
    }
}

#[test]
fn test_domain_exhausted_when_random_count_too_large() {
    // Random domain {0..3}, exhaustive {0, 1}: two fresh cases exist, four requested.
    let nodes = vec![int_node(vec![0, 1], 0, 3)];
    let config = GeneratorConfig {
        random_count: 4,
        seed: Some(11),
        limits: GenerateLimits {
            max_case_retries: 500,
            ..GenerateLimits::default()
        },
    };
    let generator = BaseSetGenerator::new(nodes, config).unwrap();
    match generator.generate_base_set().unwrap_err() {
        GenerateError::DomainExhausted {
            requested,
            accepted,
            ..
        } => {
            assert_eq!(requested, 4);
            assert_eq!(accepted, 2);
        }
        other => panic!("expected DomainExhausted, got {other:?}"),
    }
}

#[test]
fn test_random_count_beyond_random_domain_rejected_at_construction() {
    let nodes = vec![int_node(vec![0], 0, 3)];
    let err = BaseSetGenerator::with_random_count(nodes, 5).unwrap_err();
    assert!(matches!(err, GenerateError::Invalid(ref errors) if errors.len() == 1));
    assert!(err.to_string().contains("5 random cases requested"));
}

#[test]
fn test_generate_from_json_nodes() {
    let json = serde_json::json!([
        {
            "type": "list",
            "exhaustive": [0, 1],
            "random": { "kind": "range", "min": 0, "max": 5 },
            "elem": { "type": "bool", "exhaustive": [true, false], "random": [true, false] }
        },
        {
            "type": "set",
            "exhaustive": [1],
            "random": { "kind": "range", "min": 0, "max": 3 },
            "elem": {
                "type": "int",
                "exhaustive": [7, 8],
                "random": { "kind": "range", "min": 0, "max": 100 }
            }
        }
    ]);
    let nodes = parse_nodes(&json.to_string()).unwrap();
    let config = GeneratorConfig::with_random_count(25).seeded(2024);
    let generator = BaseSetGenerator::new(nodes, config).unwrap();

    let exhaustive = generator.generate_exhaustive_cases().unwrap();
    // lists: [], [true], [false]; sets: {7}, {8}
    assert_eq!(exhaustive.len(), 6);

    let base = generator.generate_base_set().unwrap();
    assert_eq!(base.len(), 31);
    let distinct: BTreeSet<&TestCase> = base.iter().collect();
    assert_eq!(distinct.len(), base.len());
    for case in &base[6..] {
        assert!(!exhaustive.contains(case));
        match &case.args()[1] {
            Value::Set(items) => assert!(items.len() <= 3),
            other => panic!("expected Set, got {other:?}"),
        }
    }
}

#[test]
fn test_config_from_json() {
    let config: GeneratorConfig = serde_json::from_value(serde_json::json!({
        "random_count": 8,
        "seed": 5,
        "limits": { "max_case_retries": 50 }
    }))
    .unwrap();
    assert_eq!(config.random_count, 8);
    assert_eq!(config.limits.max_case_retries, 50);
    assert_eq!(
        config.limits.max_redraws,
        GenerateLimits::default().max_redraws
    );

    let nodes = vec![int_node(vec![], 0, 1_000)];
    let generator = BaseSetGenerator::new(nodes, config).unwrap();
    assert_eq!(
        generator.generate_base_set().unwrap(),
        generator.generate_base_set().unwrap()
    );
}

#[test]
fn test_unsampleable_domains_rejected_at_construction() {
    let cases = [
        ValueNode::float(vec![], RandomDomain::range(-1e308, 1e308)),
        ValueNode::str("ab", vec![], SizeDomain::values(vec![usize::MAX])),
        ValueNode::list(
            int_node(vec![], 0, 0),
            vec![],
            SizeDomain::range(0, usize::MAX),
        ),
    ];
    for node in cases {
        let config = GeneratorConfig::with_random_count(1).seeded(1);
        match BaseSetGenerator::new(vec![node.clone()], config) {
            Err(GenerateError::Invalid(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected Invalid for {node:?}, got {other:?}"),
        }
    }
}
