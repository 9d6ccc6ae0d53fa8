use class_dict::{
    collect, collect_and_merge, collect_from_callback, merge_dict, ClassComposer, ClassDictConfig,
    ClassDictionary, ClassValue,
};

/// A component's class dictionary mixing every kind of value
fn component_classes(yummy: bool, supremacy: bool) -> ClassDictionary {
    ClassDictionary::new()
        // Value is false, so key is skipped
        .with("px-2 border-3 flex flex-col", yummy)
        // Value is true, so key is kept
        .with("grid m-4", supremacy)
        // Plain string
        .with("padding", "px-1 py-3")
        // List of values
        .with(
            "margin",
            vec![
                ClassValue::from(yummy.then_some("mx-1")),
                ClassValue::from(supremacy.then_some("my-3")),
            ],
        )
        // Callback
        .with(
            "border",
            ClassValue::thunk(move || if supremacy { "border-b" } else { "border-l" }),
        )
        // Nested dictionary
        .with(
            "transition",
            ClassDictionary::new().with("text-sm text-white", yummy),
        )
}

#[test]
fn test_component_dictionary_with_override() {
    let values = [component_classes(false, true).into(), "gap-3 bg-white".into()];

    let tokens = collect(&values).unwrap();
    assert_eq!(
        tokens,
        vec!["grid", "m-4", "px-1 py-3", "my-3", "border-b", "gap-3 bg-white"]
    );

    let merged = collect_and_merge(&values).unwrap();
    assert_eq!(merged, "grid m-4 px-1 py-3 my-3 border-b gap-3 bg-white");
}

#[test]
fn test_flipped_conditions() {
    let merged = collect_and_merge(&[component_classes(true, false).into()]).unwrap();
    insta::assert_snapshot!(merged, @"border-3 flex flex-col px-1 py-3 mx-1 border-l text-sm text-white");
}

#[test]
fn test_merge_dict_override_wins() {
    let dict = ClassDictionary::new()
        .with("p-2 bg-red-500", true)
        .with("size", "w-4 h-4");

    let merged = merge_dict(&dict, &["p-6".into(), "bg-blue-500".into()]).unwrap();
    assert_eq!(merged, "w-4 h-4 p-6 bg-blue-500");
}

#[test]
fn test_collect_from_callback() {
    let active = true;
    let merged = collect_from_callback(|| {
        ClassDictionary::new()
            .with("rounded px-4 py-2", true)
            .with("bg-gray-100", !active)
            .with("state", active.then_some("bg-indigo-600 text-white"))
    })
    .unwrap();
    assert_eq!(merged, "rounded px-4 py-2 bg-indigo-600 text-white");
}

#[test]
fn test_order_preservation() {
    let values = [
        ClassDictionary::new()
            .with("padding", "px-1 py-3")
            .with("margin", vec!["mx-1", "my-3"])
            .into(),
        "gap-3 bg-white".into(),
    ];
    assert_eq!(
        collect(&values).unwrap(),
        vec!["px-1 py-3", "mx-1", "my-3", "gap-3 bg-white"]
    );
}

#[test]
fn test_purity_with_idempotent_thunks() {
    let values = [component_classes(false, true).into(), "gap-3".into()];
    assert_eq!(collect(&values).unwrap(), collect(&values).unwrap());
}

#[test]
fn test_later_arguments_override_earlier() {
    let merged = collect_and_merge(&[
        "p-4 text-sm bg-white".into(),
        ClassDictionary::new().with("hover:bg-gray-50", true).into(),
        vec!["px-2", "text-lg"].into(),
    ])
    .unwrap();
    assert_eq!(merged, "p-4 bg-white hover:bg-gray-50 px-2 text-lg");
}

#[test]
fn test_json_document_matches_builder() {
    let json = r#"[
        {
            "px-2 border-3 flex flex-col": false,
            "grid m-4": true,
            "padding": "px-1 py-3",
            "margin": [false, "my-3"],
            "transition": {"text-sm text-white": false}
        },
        "gap-3 bg-white"
    ]"#;

    let values = class_dict::parse_arguments(json).unwrap();
    let merged = ClassComposer::from_config(&ClassDictConfig::default())
        .collect_and_merge(&values)
        .unwrap();
    assert_eq!(merged, "grid m-4 px-1 py-3 my-3 gap-3 bg-white");
}
