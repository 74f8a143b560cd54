use idlprune_ast::*;
use idlprune_core::resolve_include;
use idlprune_core::walker::symbols;

pub fn function_names(doc: &Document) -> Vec<&str> {
    doc.functions().map(|f| f.name.as_str()).collect()
}

pub fn struct_names(doc: &Document) -> Vec<&str> {
    doc.structs.iter().map(|s| s.name.as_str()).collect()
}

fn declares(doc: &Document, name: &str) -> bool {
    doc.struct_likes().any(|s| s.name == name)
        || doc.typedefs.iter().any(|t| t.alias == name)
        || doc.enums.iter().any(|e| e.name == name)
}

/// Every type spelled by a kept declaration of `doc`
fn kept_references(doc: &Document) -> Vec<&TypeRef> {
    let mut refs = Vec::new();
    for function in doc.functions() {
        if let Some(ret) = &function.return_type {
            refs.extend(symbols(ret));
        }
        for field in function.arguments.iter().chain(function.throws.iter()) {
            refs.extend(symbols(&field.ty));
        }
    }
    for structured in doc.struct_likes() {
        for field in &structured.fields {
            refs.extend(symbols(&field.ty));
        }
    }
    for typedef in &doc.typedefs {
        refs.extend(symbols(&typedef.ty));
    }
    refs
}

/// Assert that nothing kept in `pruned` refers to a declaration that was swept
///
/// A reference counts as dangling when `original` declared the target and
/// `pruned` no longer does, locally or in the included file.
pub fn assert_closed(original: &IdlGraph, pruned: &IdlGraph) {
    for (id, doc) in pruned.iter() {
        let before = original.get(id).expect("same file ids");
        for reference in kept_references(doc) {
            if !reference.is_qualified() {
                if declares(before, &reference.name) {
                    assert!(
                        declares(doc, &reference.name),
                        "{}: `{}` is referenced but was swept",
                        doc.path,
                        reference.name
                    );
                }
                continue;
            }

            let edge = resolve_include(doc, reference)
                .unwrap_or_else(|e| panic!("{}: include was dropped: {}", doc.path, e));
            let target_before = original.get(edge.target).expect("target");
            let target = pruned.get(edge.target).expect("target");
            if declares(target_before, reference.symbol()) {
                assert!(
                    declares(target, reference.symbol()),
                    "{}: `{}` is referenced from {} but was swept",
                    target.path,
                    reference.symbol(),
                    doc.path
                );
            }
        }
    }
}

/// Assert both graphs hold identical documents under the same ids
pub fn assert_same_graph(left: &IdlGraph, right: &IdlGraph) {
    assert_eq!(left.len(), right.len());
    for (id, doc) in left.iter() {
        assert_eq!(Some(doc), right.get(id), "{} differs", doc.path);
    }
}
