//! Integration tests for method-transform

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::sync::Arc;
use std::thread;

use method_transform::config::Config;
use method_transform::description::{
    AnnotationDescription, AnnotationValue, ParameterToken, TypeVariableToken, parse_tokens,
};
use method_transform::modifier::{MethodManifestation, Ownership, SyntheticState, Visibility};
use method_transform::{
    Compound, MethodDescription, MethodToken, MethodTransformer, ModifierContributor,
    ModifierRule, ModifierTransformation, Modifiers, TokenTransformer, TypeDescription,
};
use pretty_assertions::assert_eq;

fn instrumented() -> TypeDescription {
    TypeDescription::new("com.example.Instrumented")
}

fn rich_method() -> MethodDescription {
    let token = MethodToken::new(
        "convert",
        Modifiers::PROTECTED | Modifiers::ABSTRACT | Modifiers::VARARGS,
        vec![TypeVariableToken {
            symbol: "T".to_string(),
            bounds: vec!["java.lang.Comparable".into()],
        }],
        "java.util.List".into(),
        vec![
            ParameterToken::of("java.lang.String").named("format"),
            ParameterToken::of("java.lang.Object[]").named("args"),
        ],
        vec!["java.io.IOException".into()],
        vec![AnnotationDescription::marker("java.lang.Deprecated")],
        Some(AnnotationValue::List(vec![AnnotationValue::Integer(1)])),
    );
    MethodDescription::latent(TypeDescription::new("com.example.Origin"), token)
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn bits(b: u16) -> Modifiers {
    Modifiers::from_bits_retain(b)
}

fn rule(range: u16, mask: u16) -> ModifierRule {
    ModifierRule::new(bits(range), bits(mask))
}

fn with_modifiers(m: Modifiers) -> MethodDescription {
    MethodDescription::latent(instrumented(), rich_method().as_token().with_modifiers(m))
}

#[test]
fn test_identity_law() {
    let method = rich_method();
    assert_eq!(MethodTransformer::NoOp.transform(&instrumented(), &method), method);
}

#[test]
fn test_chain_composition_law() {
    let a = MethodTransformer::override_with([Visibility::Public]);
    let b = MethodTransformer::override_with([MethodManifestation::Final]);
    let chain = MethodTransformer::compound([a.clone(), b.clone()]);
    let method = rich_method();

    assert_eq!(
        chain.transform(&instrumented(), &method),
        b.transform(&instrumented(), &a.transform(&instrumented(), &method))
    );
}

#[test]
fn test_empty_chain_is_identity() {
    let method = rich_method();
    let empty = MethodTransformer::compound([]);
    assert_eq!(empty.transform(&instrumented(), &method), method);
}

#[test]
fn test_override_order_sensitivity() {
    let c1 = rule(0b0110, 0b0010);
    let c2 = rule(0b0010, 0b0000);
    let input = with_modifiers(bits(0b0110));

    let forward = MethodTransformer::override_with([c1, c2]);
    assert_eq!(forward.transform(&instrumented(), &input).modifiers(), bits(0b0000));

    let backward = MethodTransformer::override_with([c2, c1]);
    assert_eq!(backward.transform(&instrumented(), &input).modifiers(), bits(0b0010));

    assert_ne!(forward, backward);
}

#[test]
fn test_chain_equality_is_ordered() {
    let a = MethodTransformer::override_with([Visibility::Public]);
    let b = MethodTransformer::override_with([Ownership::Static]);
    assert_ne!(a, b);

    let chain = MethodTransformer::compound([a.clone(), b.clone()]);
    let rebuilt = MethodTransformer::compound([
        MethodTransformer::override_with([Visibility::Public]),
        MethodTransformer::override_with([Ownership::Static]),
    ]);
    let reversed = MethodTransformer::compound([b, a]);

    assert_eq!(chain, rebuilt);
    assert_eq!(hash_of(&chain), hash_of(&rebuilt));
    assert_ne!(chain, reversed);
}

#[test]
fn test_override_leaves_other_fields_identical() {
    let transformer = MethodTransformer::override_with([
        &Visibility::Private as &dyn ModifierContributor,
        &Ownership::Static,
        &SyntheticState::Synthetic,
    ]);
    let method = rich_method();
    let before = method.as_token();
    let after = transformer.transform(&instrumented(), &method).as_token();

    assert_eq!(
        after.modifiers(),
        Modifiers::PRIVATE
            | Modifiers::STATIC
            | Modifiers::SYNTHETIC
            | Modifiers::ABSTRACT
            | Modifiers::VARARGS
    );
    assert_eq!(after.clone().with_modifiers(before.modifiers()), before);
    assert_eq!(
        serde_json::to_value(after.with_modifiers(before.modifiers())).unwrap(),
        serde_json::to_value(&before).unwrap()
    );
}

#[test]
fn test_missing_contributor_fails_before_construction() {
    let missing = MethodTransformer::override_with_optional([
        Some(rule(0x0007, 0x0001)),
        None,
        Some(rule(0x0008, 0x0008)),
    ]);
    assert!(missing.unwrap_err().is_invalid_argument());
}

#[test]
fn test_opaque_contributor_is_applied_as_given() {
    struct Opaque {
        range: Modifiers,
        mask: Modifiers,
    }
    impl ModifierContributor for Opaque {
        fn range(&self) -> Modifiers {
            self.range
        }
        fn mask(&self) -> Modifiers {
            self.mask
        }
    }

    let opaque = Opaque {
        range: Modifiers::PRIVATE,
        mask: Modifiers::STATIC,
    };
    let captured = ModifierRule::of(&opaque);
    assert!(!captured.is_confined());

    let transformer = MethodTransformer::override_with_optional([Some(opaque)]).unwrap();
    assert_eq!(transformer, MethodTransformer::override_with([captured]));

    for m in [0x0000, 0x0002, 0x0413, 0x8003] {
        let output = transformer.transform(&instrumented(), &with_modifiers(bits(m)));
        assert_eq!(output.modifiers(), bits((m & !0x0002) | 0x0008), "{m:#06x}");
    }
}

#[test]
fn test_transform_never_mutates_input() {
    let method = rich_method();
    let snapshot = method.clone();
    let transformer = MethodTransformer::compound([
        MethodTransformer::override_with([Visibility::Public]),
        MethodTransformer::simple(TokenTransformer::custom("strip", |token: MethodToken| {
            token.with_modifiers(Modifiers::empty())
        })),
    ]);

    let output = transformer.transform(&instrumented(), &method);

    assert_eq!(method, snapshot);
    assert_eq!(output.modifiers(), Modifiers::empty());
    assert_eq!(output.declaring_type(), &instrumented());
}

#[test]
fn test_transformers_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MethodTransformer>();
    assert_send_sync::<Compound>();
    assert_send_sync::<ModifierTransformation>();

    let transformer = MethodTransformer::override_with([Visibility::Public, Visibility::Private]);
    let transformer = Arc::new(transformer);
    let expected = transformer.transform(&instrumented(), &rich_method());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let transformer = Arc::clone(&transformer);
            thread::spawn(move || {
                let owner = TypeDescription::new(format!("com.example.Generated{i}"));
                (0..100)
                    .map(|_| transformer.transform(&owner, &rich_method()).modifiers())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap();
        assert!(results.iter().all(|m| *m == expected.modifiers()));
    }
}

#[test]
fn test_config_file_to_transformed_methods() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "transformer:
  chain:
    - override: [public]
    - noop
    - override: [final, synchronized]
"
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    let transformer = config.compile_transformer().unwrap();

    let tokens = parse_tokens(
        r"
- name: get
  modifiers: PRIVATE
  return_type: java.lang.Object
- name: set
  modifiers: PROTECTED | STATIC
  return_type: void
  parameters:
    - type: java.lang.Object
",
    )
    .unwrap();
    let methods: Vec<_> = tokens
        .into_iter()
        .map(|token| MethodDescription::latent(instrumented(), token))
        .collect();

    let output = transformer.transform_all(&instrumented(), &methods);

    assert_eq!(
        output.iter().map(MethodDescription::modifiers).collect::<Vec<_>>(),
        vec![
            Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::SYNCHRONIZED,
            Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL | Modifiers::SYNCHRONIZED,
        ]
    );
    assert_eq!(output[1].parameters(), methods[1].parameters());
}
