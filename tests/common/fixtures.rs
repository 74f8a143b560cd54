use idlprune_ast::*;

/// Repository identity used by every fixture graph
pub const REPO: &str = "git@example.com:org/idl.git";

pub fn make_struct(name: &str, fields: Vec<(&str, TypeExpr)>) -> StructLike {
    StructLike {
        name: name.into(),
        fields: fields
            .into_iter()
            .enumerate()
            .map(|(i, (n, ty))| Field::new(i as i32 + 1, n, ty))
            .collect(),
        span: Span::dummy(),
    }
}

pub fn make_function(name: &str, ret: Option<TypeExpr>, args: Vec<TypeExpr>) -> Function {
    Function {
        name: name.into(),
        return_type: ret,
        arguments: args
            .into_iter()
            .enumerate()
            .map(|(i, ty)| Field::new(i as i32 + 1, format!("arg{}", i + 1), ty))
            .collect(),
        ..Function::default()
    }
}

pub fn make_service(name: &str, functions: Vec<Function>) -> Service {
    Service {
        name: name.into(),
        functions,
        ..Service::default()
    }
}

pub fn string() -> TypeExpr {
    TypeExpr::primitive(BaseType::String)
}

/// Add an include edge and return its position in `owner`
pub fn add_include(graph: &mut IdlGraph, owner: FileId, target: FileId) -> usize {
    let path = graph.get(target).expect("target in graph").path.clone();
    let doc = graph.get_mut(owner).expect("owner in graph");
    let index = doc.includes.len();
    doc.includes.push(Include::new(path, index, target));
    index
}

/// `stem.symbol` reference through the include at `index`
pub fn qualified(stem: &str, index: usize, symbol: &str) -> TypeExpr {
    TypeExpr::Named(TypeRef::qualified(stem, index, symbol))
}

/// `Ping() returns void` and `Echo(string s) returns EchoReply`, plus an unused request type
pub fn echo_document() -> Document {
    let mut doc = Document::new("echo.thrift");
    doc.services.push(make_service(
        "EchoService",
        vec![
            make_function("Ping", None, vec![]),
            make_function("Echo", Some(TypeExpr::named("EchoReply")), vec![string()]),
        ],
    ));
    doc.structs.push(make_struct("EchoReply", vec![("text", string())]));
    doc.structs.push(make_struct("EchoRequest", vec![("text", string())]));
    doc
}

/// `User{name, addr: Address}`, `Address{city}`, and an unrelated `Order`
pub fn user_document() -> Document {
    let mut doc = Document::new("user.thrift");
    doc.structs.push(make_struct(
        "User",
        vec![("name", string()), ("addr", TypeExpr::named("Address"))],
    ));
    doc.structs.push(make_struct("Address", vec![("city", string())]));
    doc.structs.push(make_struct(
        "Order",
        vec![("id", TypeExpr::primitive(BaseType::I64))],
    ));
    doc
}

/// a.thrift includes b.thrift
///
/// `GetB() returns b.Widget`, `Foo(b.Gear)` and `Unused() returns b.Gadget`
/// live in a.thrift; `Widget` needs `Part` in b.thrift.
pub fn make_a_b() -> (IdlGraph, FileId, FileId) {
    let mut graph = IdlGraph::new();
    let a = graph.insert(Document::new("a.thrift"));
    let b = graph.insert(Document::new("b.thrift"));
    let idx = add_include(&mut graph, a, b);

    let doc_a = graph.get_mut(a).expect("a");
    doc_a.services.push(make_service(
        "AService",
        vec![
            make_function("GetB", Some(qualified("b", idx, "Widget")), vec![]),
            make_function("Foo", None, vec![qualified("b", idx, "Gear")]),
            make_function("Unused", Some(qualified("b", idx, "Gadget")), vec![]),
        ],
    ));

    let doc_b = graph.get_mut(b).expect("b");
    doc_b.structs.push(make_struct("Widget", vec![("part", TypeExpr::named("Part"))]));
    doc_b.structs.push(make_struct("Part", vec![("serial", string())]));
    doc_b.structs.push(make_struct("Gadget", vec![]));
    doc_b.structs.push(make_struct("Gear", vec![("teeth", TypeExpr::primitive(BaseType::I32))]));

    (graph, a, b)
}

/// c.thrift includes d.thrift but never refers to it
pub fn make_c_d() -> (IdlGraph, FileId, FileId) {
    let mut graph = IdlGraph::new();
    let c = graph.insert(Document::new("c.thrift"));
    let d = graph.insert(Document::new("d.thrift"));
    add_include(&mut graph, c, d);

    let doc_c = graph.get_mut(c).expect("c");
    doc_c.services.push(make_service(
        "CService",
        vec![make_function("Local", Some(TypeExpr::named("Thing")), vec![])],
    ));
    doc_c.structs.push(make_struct("Thing", vec![("label", string())]));

    graph
        .get_mut(d)
        .expect("d")
        .structs
        .push(make_struct("Remote", vec![]));

    (graph, c, d)
}
