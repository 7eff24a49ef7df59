//! Integration tests for end-to-end declaration graph construction.
//!
//! These tests model small but realistic managed libraries and verify the
//! overall graph shape: namespace tree, base ordering, shells for referenced
//! types and the traversal order emitters see.

use cilbind::prelude::*;

fn find(graph: &DeclGraph, identity: &str) -> DeclId {
    graph
        .decl_ids()
        .find(|&id| graph.decl(id).identity == identity)
        .unwrap_or_else(|| panic!("no declaration named {identity}"))
}

fn media_universe() -> Result<(MetadataUniverse, UnitId)> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("media");
    let sys = *universe.system();

    // public abstract class Source { }
    let source = TypeEntryBuilder::class(&mut universe, unit, "Media", "Source")?
        .abstract_type()
        .id();

    // public interface IStream { int Read(); }
    let stream = TypeEntryBuilder::interface(&mut universe, unit, "Media", "IStream")?
        .method("Read", |method| {
            method.abstract_method().returns(TypeRef::named(sys.int32))
        })
        .id();

    // public sealed class Player {
    //     public Player();
    //     public bool Play(string path);
    //     public int Volume { get; set; }
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Media", "Player")?
        .sealed()
        .ctor(|ctor| ctor)
        .method("Play", |method| {
            method
                .param("path", TypeRef::named(sys.string))
                .returns(TypeRef::named(sys.boolean))
        })
        .property("Volume", TypeRef::named(sys.int32), |prop| prop);

    // public class FileSource : Source, IStream { }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Media", "FileSource")?
        .extends(TypeRef::named(source))
        .implements(TypeRef::named(stream));

    // public enum Codec { Opus = 0, Flac = 1 }
    let _ = TypeEntryBuilder::enumeration(&mut universe, unit, "Media", "Codec", TypeCode::Int32)?
        .literal("Opus", Constant::I4(0))
        .literal("Flac", Constant::I4(1));

    // namespace Media.Net { public class HttpSource { } }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Media.Net", "HttpSource")?;

    Ok((universe, unit))
}

/// Test that a multi-namespace library binds into the expected tree with
/// every exported type in place.
#[test]
fn test_media_library_end_to_end() -> Result<()> {
    let (universe, unit) = media_universe()?;
    let output = bind(&universe, unit)?;
    assert!(output.diagnostics.is_empty());

    let graph = &output.graph;
    let root = graph.namespace(graph.root());
    assert_eq!(root.name, "media");
    assert!(root.decls.is_empty());
    assert_eq!(root.children.len(), 1);

    let media = graph.namespace(root.children[0]);
    assert_eq!(media.name, "Media");
    assert_eq!(media.decls.len(), 5);
    assert_eq!(media.children.len(), 1);
    assert_eq!(graph.namespace_path(media.children[0]), "Media.Net");
    assert_eq!(graph.namespace(media.children[0]).decls.len(), 1);

    let player = graph.decl(find(graph, "Media.Player"));
    let class = player.as_class().unwrap();
    assert_eq!(class.kind, ClassKind::RefType);
    assert!(class.is_final);
    let members: Vec<_> = class
        .members
        .iter()
        .map(|&member| graph.decl(member).display_name.as_str())
        .collect();
    assert_eq!(members, ["new", "Play", "Volume"]);

    let source = graph.decl(find(graph, "Media.Source"));
    assert!(!source.as_class().unwrap().is_final);

    Ok(())
}

/// Test that the base class comes first in the base list and implemented
/// interfaces follow, each referencing the already-declared type.
#[test]
fn test_base_class_precedes_interfaces() -> Result<()> {
    let (universe, unit) = media_universe()?;
    let output = bind(&universe, unit)?;

    let graph = &output.graph;
    let file_source = graph.decl(find(graph, "Media.FileSource"));
    let bases = &file_source.as_class().unwrap().bases;
    assert_eq!(bases.len(), 2);
    assert!(!bases[0].is_interface);
    assert_eq!(graph.decl(bases[0].decl).identity, "Media.Source");
    assert!(bases[1].is_interface);
    assert_eq!(graph.decl(bases[1].decl).identity, "Media.IStream");

    Ok(())
}

/// Test that enum declarations carry their underlying kind and the literal
/// values in declaration order.
#[test]
fn test_enum_items_follow_declaration_order() -> Result<()> {
    let (universe, unit) = media_universe()?;
    let output = bind(&universe, unit)?;

    let graph = &output.graph;
    let codec = graph.decl(find(graph, "Media.Codec"));
    let decl = codec.as_enumeration().unwrap();
    assert_eq!(decl.underlying, PrimitiveKind::I4);
    let items: Vec<_> = decl
        .items
        .iter()
        .map(|item| (item.name.as_str(), item.value))
        .collect();
    assert_eq!(items, [("Opus", EnumValue::Signed(0)), ("Flac", EnumValue::Signed(1))]);

    Ok(())
}

/// Test that a type referenced from a signature but not exported becomes a
/// shell declaration: present for cross-references, excluded from emission.
#[test]
fn test_unexported_references_stay_as_shells() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");

    // internal class Hidden { }
    let hidden = TypeEntryBuilder::class(&mut universe, unit, "Example", "Hidden")?
        .not_exported()
        .id();

    // public class Publisher { public Hidden Make(); }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Example", "Publisher")?
        .method("Make", |method| method.returns(TypeRef::named(hidden)));

    let output = bind(&universe, unit)?;
    assert!(output.diagnostics.is_empty());

    let graph = &output.graph;
    let shell = graph.decl(find(graph, "Example.Hidden"));
    assert!(!shell.is_generated);
    assert!(!shell.emittable());
    assert!(shell.as_class().unwrap().members.is_empty());

    let make = graph.decl(find(graph, "Example.Publisher:Make()"));
    assert!(make.emittable());
    assert_eq!(
        make.as_method().unwrap().return_type,
        TypeDesc::Tag(find(graph, "Example.Hidden"))
    );

    // the shell still lives in its namespace so references can be resolved
    let example = graph
        .namespace_ids()
        .find(|&id| graph.namespace_path(id) == "Example")
        .unwrap();
    assert_eq!(graph.namespace(example).decls.len(), 2);

    Ok(())
}

/// Test that nested types keep their `+` metadata identity while flattening
/// into the namespace of the declaring type.
#[test]
fn test_nested_types_keep_plus_identities() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");

    // public class Order { public class Line { } }
    let order = TypeEntryBuilder::class(&mut universe, unit, "Shop", "Order")?.id();
    let _ = TypeEntryBuilder::nested_class(&mut universe, order, "Line")?;

    let output = bind(&universe, unit)?;
    let graph = &output.graph;

    let line = graph.decl(find(graph, "Shop.Order+Line"));
    assert_eq!(line.display_name, "Line");
    assert!(line.emittable());
    assert_eq!(runtime_type_name(&line.identity), "Shop.Order/Line");

    let shop = graph
        .namespace_ids()
        .find(|&id| graph.namespace_path(id) == "Shop")
        .unwrap();
    assert_eq!(graph.namespace(shop).decls.len(), 2);
    assert!(matches!(line.owner, Owner::Namespace(id) if id == shop));

    Ok(())
}

/// Test that value types come through as value-kind classes with no declared
/// bases.
#[test]
fn test_value_types_bind_with_value_kind() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");
    let sys = *universe.system();

    // public struct Point { public int X; public int Y; }
    let _ = TypeEntryBuilder::value_type(&mut universe, unit, "Geometry", "Point")?
        .field("X", TypeRef::named(sys.int32))
        .field("Y", TypeRef::named(sys.int32));

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let point = graph.decl(find(graph, "Geometry.Point"));
    let class = point.as_class().unwrap();
    assert_eq!(class.kind, ClassKind::ValueType);
    assert_eq!(class.members.len(), 2);
    assert!(class.bases.is_empty());

    Ok(())
}

struct Lister {
    events: Vec<String>,
}

impl GraphVisitor for Lister {
    fn visit_class(&mut self, _graph: &DeclGraph, _id: DeclId, decl: &Declaration) {
        self.events.push(format!("class {}", decl.display_name));
    }
    fn visit_enumeration(&mut self, _graph: &DeclGraph, _id: DeclId, decl: &Declaration) {
        self.events.push(format!("enum {}", decl.display_name));
    }
    fn visit_method(&mut self, _graph: &DeclGraph, _id: DeclId, decl: &Declaration) {
        self.events.push(format!("method {}", decl.display_name));
    }
    fn visit_field(&mut self, _graph: &DeclGraph, _id: DeclId, decl: &Declaration) {
        self.events.push(format!("field {}", decl.display_name));
    }
    fn visit_property(&mut self, _graph: &DeclGraph, _id: DeclId, decl: &Declaration) {
        self.events.push(format!("property {}", decl.display_name));
    }
}

/// Test that walking a bound graph presents classes before their members,
/// properties before their accessors and types in namespace order.
#[test]
fn test_walk_presents_declarations_in_emitter_order() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");
    let sys = *universe.system();

    // public class Tool {
    //     public Tool();
    //     public void Run();
    //     public int Count;
    //     public string Name { get; set; }
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "App", "Tool")?
        .ctor(|ctor| ctor)
        .method("Run", |method| method)
        .field("Count", TypeRef::named(sys.int32))
        .property("Name", TypeRef::named(sys.string), |prop| prop);

    // public enum Mode : byte { Off = 0 }
    let _ = TypeEntryBuilder::enumeration(&mut universe, unit, "App", "Mode", TypeCode::Byte)?
        .literal("Off", Constant::U1(0));

    let output = bind(&universe, unit)?;
    let mut lister = Lister { events: Vec::new() };
    walk(&output.graph, &mut lister);
    assert_eq!(
        lister.events,
        vec![
            "class Tool",
            "method new",
            "method Run",
            "field Count",
            "property Name",
            "method get_Name",
            "method set_Name",
            "enum Mode",
        ]
    );

    Ok(())
}
