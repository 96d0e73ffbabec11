//! Shared model fixtures for in-crate tests.

use crate::model::{
    ChangeTrackingStrategy, EntityTypeId, ForeignKeyId, ForeignKeyOptions, MemberBinding,
    MutableModel, NavigationConfig, NavigationId, PropertyConfig, PropertyId, ShapeId,
};

/// Register a shape with property bindings for each of `members`.
pub fn shape(
    model: &mut MutableModel,
    name: &str,
    base: Option<ShapeId>,
    members: &[&str],
) -> ShapeId {
    let shape = model.add_shape(name, base).expect("shape");
    for member in members {
        model
            .bind_member(shape, MemberBinding::property(*member))
            .expect("bind member");
    }

    shape
}

/// Add a root entity type over a fresh shape and declare `Id` as its key.
pub fn keyed_entity(model: &mut MutableModel, name: &str, members: &[&str]) -> (EntityTypeId, PropertyId) {
    let mut bound = vec!["Id"];
    bound.extend_from_slice(members);
    let shape = shape(model, name, None, &bound);
    let et = model.add_entity_type(name, shape, None).expect("entity type");
    let id = model.add_property(et, PropertyConfig::new("Id")).expect("Id");
    model.set_primary_key(et, &[id]).expect("primary key");

    (et, id)
}

///
/// OrderFixture
///
/// `Order { Id (key), Total }` with `SpecialOrder : Order { Note }`.
///

pub struct OrderFixture {
    pub model: MutableModel,
    pub order: EntityTypeId,
    pub special_order: EntityTypeId,
    pub id: PropertyId,
    pub total: PropertyId,
    pub note: PropertyId,
}

pub fn order_model() -> OrderFixture {
    let mut model = MutableModel::new();

    let order_shape = shape(&mut model, "Sales.Order", None, &["Id", "Total"]);
    let special_shape = shape(&mut model, "Sales.SpecialOrder", Some(order_shape), &["Note"]);

    let order = model
        .add_entity_type("Order", order_shape, None)
        .expect("Order");
    let special_order = model
        .add_entity_type("SpecialOrder", special_shape, Some(order))
        .expect("SpecialOrder");

    let id = model.add_property(order, PropertyConfig::new("Id")).expect("Id");
    let total = model
        .add_property(order, PropertyConfig::new("Total"))
        .expect("Total");
    model.set_primary_key(order, &[id]).expect("primary key");

    let note = model
        .add_property(special_order, PropertyConfig::new("Note").nullable())
        .expect("Note");

    OrderFixture {
        model,
        order,
        special_order,
        id,
        total,
        note,
    }
}

///
/// OwnershipFixture
///
/// `C` owned by `B`, `B` owned by `A`, and an unrelated root `X`.
///

pub struct OwnershipFixture {
    pub model: MutableModel,
    pub a: EntityTypeId,
    pub b: EntityTypeId,
    pub c: EntityTypeId,
    pub x: EntityTypeId,
    pub a_shape: ShapeId,
    pub x_shape: ShapeId,
    pub b_ownership: ForeignKeyId,
    pub c_ownership: ForeignKeyId,
}

pub fn ownership_chain() -> OwnershipFixture {
    let mut model = MutableModel::new();

    let (a, _) = keyed_entity(&mut model, "A", &[]);
    let (x, _) = keyed_entity(&mut model, "X", &[]);
    let a_shape = model.entity_type(a).expect("A").shape;
    let x_shape = model.entity_type(x).expect("X").shape;

    let b_shape = shape(&mut model, "B", None, &["Key"]);
    let b = model
        .add_shared_entity_type("A.Details#B", b_shape)
        .expect("B");
    let b_key = model.add_property(b, PropertyConfig::new("Key")).expect("Key");
    let b_owner = model
        .add_property(b, PropertyConfig::new("AId"))
        .expect("AId");
    let b_key_id = model.add_key(b, &[b_key]).expect("B key");
    let a_pk = model.find_primary_key(a).expect("lookup").expect("A key");
    let b_ownership = model
        .add_foreign_key(b, &[b_owner], a_pk, ForeignKeyOptions::ownership())
        .expect("B ownership");

    let c_shape = shape(&mut model, "C", None, &[]);
    let c = model
        .add_shared_entity_type("A.Details#B.Extra#C", c_shape)
        .expect("C");
    let c_owner = model
        .add_property(c, PropertyConfig::new("BKey"))
        .expect("BKey");
    let c_ownership = model
        .add_foreign_key(c, &[c_owner], b_key_id, ForeignKeyOptions::ownership())
        .expect("C ownership");

    OwnershipFixture {
        model,
        a,
        b,
        c,
        x,
        a_shape,
        x_shape,
        b_ownership,
        c_ownership,
    }
}

///
/// BlogFixture
///
/// `Blog { Id, Posts }` principal with `Post { Id, BlogId }` dependents.
///

pub struct BlogFixture {
    pub model: MutableModel,
    pub blog: EntityTypeId,
    pub post: EntityTypeId,
    pub blog_id: PropertyId,
    pub post_blog_id: PropertyId,
    pub posts: NavigationId,
    pub post_blog: ForeignKeyId,
}

pub fn blog_model(strategy: ChangeTrackingStrategy) -> BlogFixture {
    let mut model = MutableModel::new();

    let blog_shape = shape(&mut model, "Blog", None, &["Id"]);
    model
        .bind_member(blog_shape, MemberBinding::collection("Posts"))
        .expect("Posts binding");
    let blog = model.add_entity_type("Blog", blog_shape, None).expect("Blog");
    model
        .set_change_tracking_strategy(blog, strategy)
        .expect("strategy");
    let blog_id = model.add_property(blog, PropertyConfig::new("Id")).expect("Id");
    let blog_pk = model.set_primary_key(blog, &[blog_id]).expect("Blog key");

    let (post, _) = keyed_entity(&mut model, "Post", &["BlogId"]);
    let post_blog_id = model
        .add_property(post, PropertyConfig::new("BlogId"))
        .expect("BlogId");
    let post_blog = model
        .add_foreign_key(post, &[post_blog_id], blog_pk, ForeignKeyOptions::default().required())
        .expect("Post -> Blog");

    let posts = model
        .add_navigation(blog, NavigationConfig::to_dependents("Posts", post_blog))
        .expect("Posts");

    BlogFixture {
        model,
        blog,
        post,
        blog_id,
        post_blog_id,
        posts,
        post_blog,
    }
}
