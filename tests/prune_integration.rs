//! End-to-end tests for crop and prune runs
//!
//! These tests drive whole include graphs through the pruner and check the
//! resulting documents, reports and reservation stores.

mod common;

use common::*;
use idlprune_ast::*;
use idlprune_core::{crop, DroppedInclude, Pruner};
use idlprune_store::{
    FixedIdentity, MemoryStore, ReservationStore, StickyConfig, YamlFileStore,
};

fn prune(
    graph: &mut IdlGraph,
    root: FileId,
    reserved: &[&str],
    store: &mut dyn ReservationStore,
) -> idlprune_core::Result<idlprune_core::PruneReport> {
    let identity = FixedIdentity::new(REPO);
    Pruner::new(store, &identity).run(graph, root, reserved)
}

// ----- flat mode -----

#[test]
fn e2e_crop_keeps_only_ping() {
    let mut doc = echo_document();
    let report = crop(&mut doc, &["Ping"]).unwrap();

    assert_eq!(function_names(&doc), vec!["Ping"]);
    assert!(doc.structs.is_empty());
    assert_eq!(report.reserved, vec!["Ping"]);
    assert_eq!(report.removed.functions, 1);
    assert_eq!(report.removed.structs, 2);
}

#[test]
fn e2e_crop_follows_struct_fields() {
    let mut doc = user_document();
    crop(&mut doc, &["User"]).unwrap();

    assert_eq!(struct_names(&doc), vec!["User", "Address"]);
    // fields of kept types are never touched
    assert_eq!(doc.structs[0].fields.len(), 2);
}

// ----- recursive mode -----

#[test]
fn e2e_prune_single_file_follows_struct_fields() {
    let mut graph = IdlGraph::new();
    let root = graph.insert(user_document());
    let mut store = MemoryStore::new();

    let report = prune(&mut graph, root, &["User"], &mut store).unwrap();

    let doc = graph.get(root).unwrap();
    assert_eq!(struct_names(doc), vec!["User", "Address"]);
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].reserved, vec!["Address", "User"]);
    assert_eq!(report.files[0].removed.structs, 1);
    assert_eq!(report.files[0].repository.as_deref(), Some(REPO));
}

#[test]
fn e2e_qualified_return_type_propagates_to_include() {
    let (mut graph, a, b) = make_a_b();
    let original = graph.clone();
    let mut store = MemoryStore::new();

    let report = prune(&mut graph, a, &["GetB"], &mut store).unwrap();

    let doc_a = graph.get(a).unwrap();
    assert_eq!(function_names(doc_a), vec!["GetB"]);
    assert_eq!(doc_a.includes.len(), 1);
    assert_eq!(doc_a.includes[0].target, b);

    let doc_b = graph.get(b).unwrap();
    assert_eq!(struct_names(doc_b), vec!["Widget", "Part"]);
    assert_eq!(report.file("b.thrift").unwrap().reserved, vec!["Part", "Widget"]);
    assert!(report.dropped_includes.is_empty());

    assert_eq!(
        store.config().names(REPO, "b.thrift"),
        Some(&["Part".to_string(), "Widget".to_string()][..])
    );
    assert_closed(&original, &graph);
}

#[test]
fn e2e_unreferenced_include_is_dropped() {
    let (mut graph, c, _) = make_c_d();
    let mut store = MemoryStore::new();

    let report = prune(&mut graph, c, &["Local"], &mut store).unwrap();

    let doc_c = graph.get(c).unwrap();
    assert!(doc_c.includes.is_empty());
    assert_eq!(struct_names(doc_c), vec!["Thing"]);
    assert_eq!(
        report.dropped_includes,
        vec![DroppedInclude {
            owner: "c.thrift".into(),
            include: "d.thrift".into(),
        }]
    );
    // nothing recorded for a file that keeps nothing
    assert!(store.config().names(REPO, "d.thrift").is_none());
    assert!(report.file("d.thrift").is_none());
}

#[test]
fn e2e_include_kept_iff_target_reserves_something() {
    let (mut graph, a, _) = make_a_b();
    let mut store = MemoryStore::new();

    // Ping-like: a function with no include references at all
    graph
        .get_mut(a)
        .unwrap()
        .services[0]
        .functions
        .push(make_function("Health", None, vec![]));

    let report = prune(&mut graph, a, &["Health"], &mut store).unwrap();

    assert!(graph.get(a).unwrap().includes.is_empty());
    assert_eq!(report.dropped_includes.len(), 1);
}

#[test]
fn e2e_second_run_from_store_matches_first() {
    let (mut first, a, _) = make_a_b();
    let mut store = MemoryStore::new();
    prune(&mut first, a, &["Foo"], &mut store).unwrap();

    let (mut second, a2, _) = make_a_b();
    let mut recalled = MemoryStore::with_config(store.config().clone());
    prune(&mut second, a2, &[], &mut recalled).unwrap();

    assert_same_graph(&first, &second);
    assert_eq!(function_names(first.get(a).unwrap()), vec!["Foo"]);
    assert_eq!(recalled.config(), store.config());
}

#[test]
fn e2e_pruning_a_pruned_graph_removes_nothing() {
    let (mut graph, a, _) = make_a_b();
    let mut store = MemoryStore::new();
    prune(&mut graph, a, &["GetB"], &mut store).unwrap();
    let once = graph.clone();

    let report = prune(&mut graph, a, &[], &mut store).unwrap();

    assert_eq!(report.total_removed(), 0);
    assert_eq!(report.store_updates, 0);
    assert_same_graph(&once, &graph);
}

#[test]
fn e2e_store_only_grows() {
    let mut store = MemoryStore::new();

    let (mut graph, a, _) = make_a_b();
    prune(&mut graph, a, &["GetB"], &mut store).unwrap();
    let before: StickyConfig = store.config().clone();

    let (mut graph, a, _) = make_a_b();
    let report = prune(&mut graph, a, &["Foo"], &mut store).unwrap();
    let after = store.config();

    for repository in before.repositories() {
        for (file, names) in before.files(repository) {
            let now = after.names(repository, file).unwrap();
            for name in names {
                assert!(now.contains(name), "{} lost {}", file, name);
            }
        }
    }
    // earlier reservations stick: GetB survives a run that only asked for Foo
    assert_eq!(function_names(graph.get(a).unwrap()), vec!["GetB", "Foo"]);
    assert_eq!(report.store_updates, 2);
}

#[test]
fn e2e_kept_declarations_keep_their_order() {
    let mut graph = IdlGraph::new();
    let mut doc = Document::new("order.thrift");
    doc.services.push(make_service(
        "Svc",
        ["Zeta", "alpha", "Mid", "beta"]
            .iter()
            .map(|n| make_function(n, None, vec![]))
            .collect(),
    ));
    for name in ["S3", "S1", "S2"] {
        doc.structs.push(make_struct(name, vec![]));
    }
    let root = graph.insert(doc);

    let mut store = MemoryStore::new();
    let report = prune(&mut graph, root, &["beta", "S2", "Zeta", "S3"], &mut store).unwrap();

    let doc = graph.get(root).unwrap();
    assert_eq!(function_names(doc), vec!["Zeta", "beta"]);
    assert_eq!(struct_names(doc), vec!["S3", "S2"]);
    // reserved lists sort case-insensitively
    assert_eq!(report.files[0].reserved, vec!["beta", "S2", "S3", "Zeta"]);
}

#[test]
fn e2e_closure_holds_across_three_files() {
    let mut graph = IdlGraph::new();
    let api = graph.insert(Document::new("api.thrift"));
    let model = graph.insert(Document::new("model.thrift"));
    let base = graph.insert(Document::new("base.thrift"));
    let to_model = add_include(&mut graph, api, model);
    let to_base = add_include(&mut graph, model, base);

    let doc = graph.get_mut(api).unwrap();
    doc.services.push(make_service(
        "Api",
        vec![
            make_function(
                "List",
                Some(TypeExpr::list(qualified("model", to_model, "Item"))),
                vec![TypeExpr::named("Filter")],
            ),
            make_function("Drop", None, vec![qualified("model", to_model, "Other")]),
        ],
    ));
    doc.typedefs.push(Typedef {
        alias: "Filter".into(),
        ty: TypeExpr::map(string(), qualified("model", to_model, "Tag")),
        span: Span::dummy(),
    });

    let doc = graph.get_mut(model).unwrap();
    doc.structs.push(make_struct(
        "Item",
        vec![("id", qualified("base", to_base, "Id")), ("tags", TypeExpr::set(TypeExpr::named("Tag")))],
    ));
    doc.structs.push(make_struct("Other", vec![]));
    doc.enums.push(Enum {
        name: "Tag".into(),
        ..Enum::default()
    });

    let doc = graph.get_mut(base).unwrap();
    doc.typedefs.push(Typedef {
        alias: "Id".into(),
        ty: TypeExpr::primitive(BaseType::I64),
        span: Span::dummy(),
    });
    doc.structs.push(make_struct("Unrelated", vec![]));

    let original = graph.clone();
    let mut store = MemoryStore::new();
    let report = prune(&mut graph, api, &["List"], &mut store).unwrap();

    assert_closed(&original, &graph);
    assert_eq!(struct_names(graph.get(model).unwrap()), vec!["Item"]);
    assert_eq!(graph.get(model).unwrap().enums.len(), 1);
    assert!(graph.get(base).unwrap().structs.is_empty());
    assert_eq!(graph.get(base).unwrap().typedefs.len(), 1);
    assert_eq!(report.files.len(), 3);
    assert_eq!(store.save_count(), 1);
}

// ----- failures -----

#[test]
fn e2e_malformed_reference_is_fatal() {
    let mut graph = IdlGraph::new();
    let mut doc = Document::new("broken.thrift");
    doc.services.push(make_service(
        "Svc",
        vec![make_function("Get", Some(qualified("missing", 4, "Thing")), vec![])],
    ));
    let root = graph.insert(doc);
    let before = graph.clone();
    let mut store = MemoryStore::new();

    let err = prune(&mut graph, root, &["Get"], &mut store).unwrap_err();

    assert_eq!(err.code(), "E-PRUNE-001");
    assert_same_graph(&before, &graph);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn e2e_cyclic_include_is_fatal() {
    let (mut graph, a, b) = make_a_b();
    add_include(&mut graph, b, a);
    let before = graph.clone();
    let mut store = MemoryStore::new();

    let err = prune(&mut graph, a, &["GetB"], &mut store).unwrap_err();

    assert_eq!(err.code(), "E-PRUNE-003");
    assert!(err.to_string().contains("a.thrift -> b.thrift -> a.thrift"));
    assert_same_graph(&before, &graph);
}

// ----- YAML store -----

#[test]
fn e2e_yaml_store_round_trips_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pruner.yml");

    let (mut graph, a, _) = make_a_b();
    let mut store = YamlFileStore::new(&path);
    prune(&mut graph, a, &["GetB"], &mut store).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("reserved_gits"));
    assert!(text.contains(REPO));

    let loaded = YamlFileStore::new(&path).load().unwrap();
    assert_eq!(
        loaded.names(REPO, "b.thrift"),
        Some(&["Part".to_string(), "Widget".to_string()][..])
    );

    let (mut again, a2, _) = make_a_b();
    prune(&mut again, a2, &[], &mut YamlFileStore::new(&path)).unwrap();
    assert_same_graph(&graph, &again);
}

#[test]
fn e2e_missing_store_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = YamlFileStore::new(dir.path().join("absent.yml"));

    let mut graph = IdlGraph::new();
    let root = graph.insert(echo_document());
    let report = prune(&mut graph, root, &["Ping"], &mut store).unwrap();

    assert_eq!(report.store_updates, 1);
    assert!(dir.path().join("absent.yml").exists());
}

#[test]
fn e2e_corrupt_store_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pruner.yml");
    std::fs::write(&path, "reserved_gits: [unterminated").unwrap();

    let (mut graph, a, _) = make_a_b();
    let before = graph.clone();
    let err = prune(&mut graph, a, &["GetB"], &mut YamlFileStore::new(&path)).unwrap_err();

    assert_eq!(err.code(), "E-PRUNE-005");
    assert_same_graph(&before, &graph);
    // the broken file is left for the user to fix
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "reserved_gits: [unterminated"
    );
}

// ----- serialized graphs -----

#[test]
fn e2e_prune_graph_read_from_json() {
    let source = r#"{
        "files": [
            {
                "path": "./a.thrift",
                "includes": [{ "path": "b.thrift", "index": 0, "target": 1 }],
                "services": [{
                    "name": "AService",
                    "functions": [
                        { "name": "GetB", "return_type": { "named": { "name": "b.Widget", "include": 0 } } },
                        { "name": "Drop", "arguments": [
                            { "id": 1, "name": "x", "type": { "primitive": "i32" } }
                        ] }
                    ]
                }]
            },
            {
                "path": "b.thrift",
                "structs": [
                    { "name": "Widget", "fields": [
                        { "id": 1, "name": "tags", "type": { "list": { "named": { "name": "Tag" } } } }
                    ] },
                    { "name": "Spare" }
                ],
                "enums": [{ "name": "Tag" }]
            }
        ]
    }"#;

    let mut graph: IdlGraph = serde_json::from_str(source).unwrap();
    let a = graph.id_of("a.thrift").unwrap();
    let mut store = MemoryStore::new();

    prune(&mut graph, a, &["GetB"], &mut store).unwrap();

    let b = graph.get(FileId(1)).unwrap();
    assert_eq!(struct_names(b), vec!["Widget"]);
    assert_eq!(b.enums.len(), 1);

    let written = serde_json::to_string(&graph).unwrap();
    let reread: IdlGraph = serde_json::from_str(&written).unwrap();
    assert_same_graph(&graph, &reread);
}
