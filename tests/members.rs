//! Integration tests for the member selection policy.
//!
//! Binding projects only the members a native caller can reach: public
//! constructors and methods, promoted explicit implementations, public
//! non-literal fields and properties with at least one public accessor.
//! Everything else stays out of the graph without failing the build.

use cilbind::prelude::*;

fn find(graph: &DeclGraph, identity: &str) -> DeclId {
    graph
        .decl_ids()
        .find(|&id| graph.decl(id).identity == identity)
        .unwrap_or_else(|| panic!("no declaration named {identity}"))
}

fn member_names(graph: &DeclGraph, class: DeclId) -> Vec<String> {
    graph
        .decl(class)
        .as_class()
        .unwrap()
        .members
        .iter()
        .map(|&member| graph.decl(member).display_name.clone())
        .collect()
}

/// Test that only public instance constructors are projected, and that
/// overloads share the `new` display name with numeric suffixes.
#[test]
fn test_constructor_selection() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");
    let sys = *universe.system();

    // public class Service {
    //     public Service();
    //     public Service(int port);
    //     internal Service(string secret);
    //     static Service();
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Api", "Service")?
        .ctor(|ctor| ctor)
        .ctor(|ctor| ctor.param("port", TypeRef::named(sys.int32)))
        .ctor(|ctor| ctor.internal().param("secret", TypeRef::named(sys.string)))
        .ctor(|ctor| ctor.static_method());

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let service = find(graph, "Api.Service");
    assert_eq!(member_names(graph, service), ["new", "new_1"]);

    let renames: Vec<_> = output
        .diagnostics
        .iter()
        .filter(|diag| diag.code == DiagnosticCode::RenamedMember)
        .collect();
    assert_eq!(renames.len(), 1);
    assert_eq!(
        renames[0].message,
        "Renaming 'Api.Service:.ctor(int)' to 'new_1'"
    );

    Ok(())
}

/// Test the method gate: public methods survive, non-public and generic ones
/// do not, and static/virtual modifiers carry through.
#[test]
fn test_method_selection() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");

    // public class Catalog {
    //     public void Add();
    //     protected void Touch();
    //     internal void Audit();
    //     private void Helper();
    //     public void Map<T>();
    //     public virtual void Refresh();
    // }
    let catalog = TypeEntryBuilder::class(&mut universe, unit, "Store", "Catalog")?
        .method("Add", |method| method)
        .method("Touch", |method| method.family())
        .method("Audit", |method| method.internal())
        .method("Helper", |method| method.private())
        .method("Map", |method| method.generic())
        .method("Refresh", |method| method.virtual_method())
        .id();

    // public class Factory { public static Catalog Create(); }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Store", "Factory")?
        .method("Create", |method| {
            method.static_method().returns(TypeRef::named(catalog))
        });

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let decl = find(graph, "Store.Catalog");
    assert_eq!(member_names(graph, decl), ["Add", "Refresh"]);

    let refresh = graph.decl(find(graph, "Store.Catalog:Refresh()"));
    assert!(refresh.as_method().unwrap().is_virtual);

    let create = graph.decl(find(graph, "Store.Factory:Create()"));
    let method = create.as_method().unwrap();
    assert!(method.is_static);
    assert_eq!(method.return_type, TypeDesc::Tag(find(graph, "Store.Catalog")));

    Ok(())
}

/// Test that members inherited from the object root are left to the target
/// language while same-named overloads with other signatures survive.
#[test]
fn test_object_root_members_stay_behind() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");
    let sys = *universe.system();

    // public class Entity {
    //     public override string ToString();
    //     public override bool Equals(object obj);
    //     public bool Equals(int tag);
    //     public static bool ReferenceEquals(object a, object b);
    //     public override int GetHashCode();
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Data", "Entity")?
        .method("ToString", |method| {
            method.virtual_method().returns(TypeRef::named(sys.string))
        })
        .method("Equals", |method| {
            method
                .virtual_method()
                .param("obj", TypeRef::named(sys.object))
                .returns(TypeRef::named(sys.boolean))
        })
        .method("Equals", |method| {
            method
                .param("tag", TypeRef::named(sys.int32))
                .returns(TypeRef::named(sys.boolean))
        })
        .method("ReferenceEquals", |method| {
            method
                .static_method()
                .param("a", TypeRef::named(sys.object))
                .param("b", TypeRef::named(sys.object))
                .returns(TypeRef::named(sys.boolean))
        })
        .method("GetHashCode", |method| {
            method.virtual_method().returns(TypeRef::named(sys.int32))
        });

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let entity = find(graph, "Data.Entity");
    assert_eq!(member_names(graph, entity), ["ToString", "Equals"]);

    let equals = graph.decl(find(graph, "Data.Entity:Equals(int)"));
    assert!(equals.emittable());

    Ok(())
}

/// Test that private virtual final methods, the shape explicit interface
/// implementations compile to, are promoted onto the surface under their
/// simple name, and keep their qualified name when a public method shadows it.
#[test]
fn test_explicit_implementations_are_promoted() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");
    let sys = *universe.system();

    // public class Wrapped : IDisposable {
    //     void IDisposable.Dispose();     compiles to private virtual final
    //     private void Cleanup();
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Res", "Wrapped")?
        .method("System.IDisposable.Dispose", |method| {
            method.private().virtual_method().final_method()
        })
        .method("Cleanup", |method| {
            method.private().param("deep", TypeRef::named(sys.boolean))
        });

    // public class Guarded : IDisposable {
    //     public void Dispose();
    //     void IDisposable.Dispose();     shadowed, stays qualified
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Res", "Guarded")?
        .method("Dispose", |method| method)
        .method("System.IDisposable.Dispose", |method| {
            method.private().virtual_method().final_method()
        });

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let wrapped = find(graph, "Res.Wrapped");
    assert_eq!(member_names(graph, wrapped), ["Dispose"]);

    let dispose = graph.decl(find(graph, "Res.Wrapped:System.IDisposable.Dispose()"));
    assert_eq!(dispose.display_name, "Dispose");
    let method = dispose.as_method().unwrap();
    assert_eq!(method.access, Access::Public);
    assert!(method.is_virtual);
    assert!(method.is_final);

    let guarded = find(graph, "Res.Guarded");
    assert_eq!(
        member_names(graph, guarded),
        ["Dispose", "System_IDisposable_Dispose"]
    );
    let shadowed = graph.decl(find(graph, "Res.Guarded:System.IDisposable.Dispose()"));
    assert_eq!(shadowed.as_method().unwrap().access, Access::Private);

    Ok(())
}

/// Test property projection: accessor declarations hang off the property,
/// stay out of the member list and keep their own modifiers.
#[test]
fn test_property_accessor_shapes() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");
    let sys = *universe.system();

    // public class Account {
    //     public decimal Balance { get; }
    //     public string Owner { get; set; }
    //     public static int Count { get; }
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Bank", "Account")?
        .property("Balance", TypeRef::named(sys.decimal), |prop| prop.read_only())
        .property("Owner", TypeRef::named(sys.string), |prop| prop)
        .property("Count", TypeRef::named(sys.int32), |prop| {
            prop.read_only().static_property()
        });

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let account = find(graph, "Bank.Account");
    assert_eq!(member_names(graph, account), ["Balance", "Owner", "Count"]);

    let balance = graph.decl(find(graph, "Bank.Account:Balance"));
    let property = balance.as_property().unwrap();
    assert_eq!(property.ty, TypeDesc::Primitive(PrimitiveKind::Decimal));
    assert!(property.setter.is_none());
    let getter = graph.decl(property.getter.unwrap());
    assert_eq!(getter.display_name, "get_Balance");
    assert!(matches!(getter.owner, Owner::Class(id) if id == account));

    let owner = graph.decl(find(graph, "Bank.Account:Owner"));
    let property = owner.as_property().unwrap();
    let setter = graph.decl(property.setter.unwrap()).as_method().unwrap();
    assert_eq!(setter.params.len(), 1);
    assert_eq!(setter.params[0].name, "value");

    let count = graph.decl(find(graph, "Bank.Account:Count"));
    let getter = graph.decl(count.as_property().unwrap().getter.unwrap());
    assert!(getter.as_method().unwrap().is_static);

    Ok(())
}

/// Test that literal and non-public fields never reach the graph while
/// public instance and static fields do.
#[test]
fn test_field_selection() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");
    let sys = *universe.system();

    // public class Config {
    //     public int Timeout;
    //     public static string Prefix;
    //     private int cache;
    //     public const int Max = 10;
    // }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Cfg", "Config")?
        .field("Timeout", TypeRef::named(sys.int32))
        .static_field("Prefix", TypeRef::named(sys.string))
        .private_field("cache", TypeRef::named(sys.int32))
        .literal("Max", Constant::I4(10));

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let config = find(graph, "Cfg.Config");
    assert_eq!(member_names(graph, config), ["Timeout", "Prefix"]);

    let timeout = graph.decl(find(graph, "Cfg.Config:Timeout"));
    let field = timeout.as_field().unwrap();
    assert_eq!(field.access, Access::Public);
    assert!(!field.is_static);

    let prefix = graph.decl(find(graph, "Cfg.Config:Prefix"));
    assert!(prefix.as_field().unwrap().is_static);

    Ok(())
}

/// Test that events are carried through the metadata model without producing
/// declarations.
#[test]
fn test_events_produce_no_declarations() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");

    // public delegate void ClickHandler();
    let handler = TypeEntryBuilder::class(&mut universe, unit, "Ui", "ClickHandler")?.id();

    // public class Button { public event ClickHandler Click; public void Press(); }
    let _ = TypeEntryBuilder::class(&mut universe, unit, "Ui", "Button")?
        .event("Click", TypeRef::named(handler))
        .method("Press", |method| method);

    let output = bind(&universe, unit)?;
    let graph = &output.graph;
    let button = find(graph, "Ui.Button");
    assert_eq!(member_names(graph, button), ["Press"]);
    assert!(graph
        .decl_ids()
        .all(|id| graph.decl(id).identity != "Ui.Button:Click"));

    Ok(())
}

/// Test that enum literals keep the signedness of the underlying type,
/// negative values and full-range unsigned values included.
#[test]
fn test_enum_values_keep_signedness() -> Result<()> {
    let mut universe = MetadataUniverse::new();
    let unit = universe.add_unit("managed");

    // public enum Status : short { Unknown = -1, Ok = 0 }
    let _ = TypeEntryBuilder::enumeration(&mut universe, unit, "Net", "Status", TypeCode::Int16)?
        .literal("Unknown", Constant::I2(-1))
        .literal("Ok", Constant::I2(0));

    // public enum Masks : uint { All = 0xFFFFFFFF }
    let _ = TypeEntryBuilder::enumeration(&mut universe, unit, "Net", "Masks", TypeCode::UInt32)?
        .literal("All", Constant::U4(u32::MAX));

    // public enum Hops : byte { Two = 2, Three }
    let _ = TypeEntryBuilder::enumeration(&mut universe, unit, "Net", "Hops", TypeCode::Byte)?
        .literal("Two", Constant::U1(2))
        .literal("Three", Constant::U1(3));

    let output = bind(&universe, unit)?;
    let graph = &output.graph;

    let status = graph.decl(find(graph, "Net.Status")).as_enumeration().unwrap();
    assert_eq!(status.underlying, PrimitiveKind::I2);
    assert_eq!(status.items[0].value, EnumValue::Signed(-1));
    assert_eq!(status.items[1].value, EnumValue::Signed(0));

    let masks = graph.decl(find(graph, "Net.Masks")).as_enumeration().unwrap();
    assert_eq!(masks.underlying, PrimitiveKind::U4);
    assert_eq!(masks.items[0].value, EnumValue::Unsigned(4_294_967_295));

    let hops = graph.decl(find(graph, "Net.Hops")).as_enumeration().unwrap();
    assert_eq!(hops.underlying, PrimitiveKind::U1);
    assert_eq!(hops.items[0].name, "Two");
    assert_eq!(hops.items[0].value, EnumValue::Unsigned(2));
    assert_eq!(hops.items[1].name, "Three");
    assert_eq!(hops.items[1].value, EnumValue::Unsigned(3));

    Ok(())
}
