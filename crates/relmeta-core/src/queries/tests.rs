use crate::{
    counts::DefaultIndexPolicy,
    error::{ErrorClass, ErrorOrigin},
    model::{ChangeTrackingStrategy, MemberRef, MutableModel, NavigationConfig, PropertyConfig},
    test_support::{blog_model, keyed_entity, order_model, ownership_chain, shape},
};

#[test]
fn entity_type_lookup_by_shape_and_name() {
    let f = ownership_chain();
    let a_shape = f.a_shape;
    let b_shape = f.model.entity_type(f.b).expect("B").shape;

    assert_eq!(f.model.find_entity_type_by_shape(a_shape), Some(f.a));
    // shared types are not found by shape alone
    assert_eq!(f.model.find_entity_type_by_shape(b_shape), None);
    assert_eq!(f.model.entity_types_by_shape(b_shape), vec![f.b]);

    assert_eq!(f.model.entity_types_by_name("B").expect("lookup"), vec![f.b]);
    assert_eq!(f.model.entity_types_by_name("A").expect("lookup"), vec![f.a]);
}

#[test]
fn shared_shapes_and_defining_navigations() {
    let mut f = ownership_chain();
    let b_shape = f.model.entity_type(f.b).expect("B").shape;

    assert!(f.model.is_shared(b_shape));
    assert!(!f.model.is_shared(f.a_shape));
    assert!(f.model.has_entity_type_with_defining_navigation(b_shape));
    assert!(f.model.has_entity_type_with_defining_navigation_named("A.Details#B"));
    assert!(!f.model.has_entity_type_with_defining_navigation_named("A"));

    // a second owned type over the same shape
    let second = f
        .model
        .add_shared_entity_type("X.Details#B", b_shape)
        .expect("second B");
    assert_eq!(f.model.entity_types_by_shape(b_shape), vec![f.b, second]);
    assert_eq!(f.model.entity_types_by_name("B").expect("lookup").len(), 2);
}

#[test]
fn display_and_short_names() {
    let f = ownership_chain();
    assert_eq!(f.model.display_name(f.a).expect("name"), "A");
    assert_eq!(f.model.display_name(f.b).expect("name"), "A.Details#B (B)");
    assert_eq!(f.model.short_name(f.c).expect("name"), "C");

    let orders = order_model();
    assert_eq!(orders.model.short_name(orders.order).expect("name"), "Order");
}

#[test]
fn hierarchy_queries() {
    let f = order_model();
    let m = &f.model;

    assert!(m.is_assignable_from(f.order, f.special_order).expect("query"));
    assert!(!m.is_assignable_from(f.special_order, f.order).expect("query"));
    assert!(m.is_strictly_derived_from(f.special_order, f.order).expect("query"));
    assert!(!m.is_strictly_derived_from(f.order, f.order).expect("query"));
    assert_eq!(m.least_derived_type(f.special_order, f.order).expect("query"), Some(f.order));
    assert_eq!(m.root_type(f.special_order).expect("query"), f.order);
}

#[test]
fn least_derived_type_of_unrelated_types_is_none() {
    let f = ownership_chain();
    assert_eq!(f.model.least_derived_type(f.a, f.x).expect("query"), None);
}

#[test]
fn discriminator_values_are_read_back() {
    let mut f = order_model();
    f.model
        .set_discriminator_value(f.special_order, "special")
        .expect("discriminator");

    assert_eq!(f.model.discriminator_value(f.special_order).expect("query"), Some("special"));
    assert_eq!(f.model.discriminator_value(f.order).expect("query"), None);
}

#[test]
fn primary_key_is_declared_only_on_the_root() {
    let f = order_model();
    let pk = f.model.find_declared_primary_key(f.order).expect("query");

    assert!(pk.is_some());
    assert_eq!(f.model.find_declared_primary_key(f.special_order).expect("query"), None);
    assert_eq!(f.model.find_primary_key(f.special_order).expect("query"), pk);
}

#[test]
fn members_include_inherited_base_first() {
    let f = order_model();
    let m = &f.model;

    assert_eq!(m.properties(f.special_order).expect("query"), vec![f.id, f.total, f.note]);
    assert_eq!(m.find_property(f.special_order, "Total").expect("query"), Some(f.total));
    assert_eq!(m.find_property(f.order, "Note").expect("query"), None);
    assert_eq!(
        m.find_declared_member(f.special_order, "Note").expect("query"),
        Some(MemberRef::Property(f.note))
    );
    assert_eq!(
        m.properties_and_navigations(f.special_order).expect("query"),
        vec![
            MemberRef::Property(f.id),
            MemberRef::Property(f.total),
            MemberRef::Property(f.note),
        ]
    );
}

#[test]
fn navigations_and_foreign_keys() {
    let f = blog_model(ChangeTrackingStrategy::Snapshot);
    let m = &f.model;

    assert_eq!(m.navigations(f.blog).expect("query"), vec![f.posts]);
    assert_eq!(m.foreign_keys_of(f.post).expect("query"), vec![f.post_blog]);
    assert!(m.navigation(f.posts).expect("nav").is_collection());

    let member = m.navigation_member_info(f.blog, "Posts").expect("binding");
    assert!(member.collection);
}

#[test]
fn missing_navigation_member_is_a_configuration_error() {
    let f = blog_model(ChangeTrackingStrategy::Snapshot);

    let err = f
        .model
        .navigation_member_info(f.blog, "Authors")
        .expect_err("no member");
    assert_eq!(err.class, ErrorClass::Configuration);
    assert_eq!(err.origin, ErrorOrigin::Navigation);
    assert!(err.message.contains("'Authors'"));
}

#[test]
fn derived_navigations_are_found_by_name() {
    let mut f = blog_model(ChangeTrackingStrategy::Snapshot);
    let post_shape = f.model.entity_type(f.post).expect("Post").shape;

    let featured_shape = shape(&mut f.model, "FeaturedPost", Some(post_shape), &["Blog"]);
    let featured = f
        .model
        .add_entity_type("FeaturedPost", featured_shape, Some(f.post))
        .expect("FeaturedPost");
    let nav = f
        .model
        .add_navigation(featured, NavigationConfig::to_principal("Blog", f.post_blog))
        .expect("Blog navigation");

    assert_eq!(f.model.find_derived_navigations(f.post, "Blog").expect("query"), vec![nav]);
    assert!(f.model.find_derived_navigations(f.blog, "Blog").expect("query").is_empty());
}

#[test]
fn property_must_belong_to_queried_type() {
    let f = order_model();
    let m = &f.model;

    assert_eq!(m.check_property_belongs_to_type(f.special_order, f.id).expect("inherited"), f.id);

    let err = m
        .check_property_belongs_to_type(f.order, f.note)
        .expect_err("Note is declared on the derived type");
    assert_eq!(err.origin, ErrorOrigin::Property);
    assert_eq!(
        err.message,
        "the property 'Note' belongs to entity type 'SpecialOrder' but is being used with entity type 'Order'"
    );
}

#[test]
fn eager_snapshots_follow_strategy() {
    let snapshot = blog_model(ChangeTrackingStrategy::Snapshot);
    assert!(snapshot.model.use_eager_snapshots(snapshot.blog).expect("query"));

    let changing = blog_model(ChangeTrackingStrategy::ChangingAndChangedNotifications);
    assert!(!changing.model.use_eager_snapshots(changing.blog).expect("query"));
}

#[test]
fn count_accessors_require_finalization() {
    let f = order_model();
    let err = f.model.property_count(f.order).expect_err("not finalized");
    assert_eq!(err.class, ErrorClass::InvariantViolation);

    let frozen = f.model.finalize(&DefaultIndexPolicy).expect("finalize");
    assert_eq!(frozen.property_count(f.special_order).expect("count"), 3);
    assert_eq!(frozen.navigation_count(f.special_order).expect("count"), 0);
    assert_eq!(frozen.original_value_count(f.special_order).expect("count"), 3);
    assert_eq!(frozen.shadow_property_count(f.special_order).expect("count"), 0);
    assert_eq!(frozen.relationship_property_count(f.special_order).expect("count"), 1);
    assert_eq!(frozen.store_generated_count(f.special_order).expect("count"), 0);
}

#[test]
fn unknown_ids_are_misuse() {
    let f = order_model();
    let mut other = MutableModel::new();
    for i in 0..4 {
        keyed_entity(&mut other, &format!("T{i}"), &[]);
    }
    let foreign = other.find_entity_type("T3").expect("T3");

    let err = f.model.display_name(foreign).expect_err("unknown id");
    assert_eq!(err.class, ErrorClass::Misuse);

    let mut model = f.model;
    let err = model
        .add_property(foreign, PropertyConfig::new("Ghost"))
        .expect_err("unknown id");
    assert_eq!(err.class, ErrorClass::Misuse);
}
