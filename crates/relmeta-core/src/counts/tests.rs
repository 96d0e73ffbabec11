use crate::{
    counts::{DefaultIndexPolicy, IndexPolicy, assign_counts, calculate_counts, find_generation_property},
    error::ModelError,
    model::{
        ChangeTrackingStrategy, EntityTypeId, ForeignKeyOptions, MemberBinding, MemberRef,
        ModelData, MutableModel, NOT_APPLICABLE, PropertyConfig, PropertyCounts, PropertyId,
        PropertyIndexes, ShapeId, SkipNavigationConfig, SkipNavigationId, ValueGenerated,
    },
    test_support::{BlogFixture, blog_model, keyed_entity, order_model, shape},
};
use proptest::prelude::*;

fn indexes(model: &ModelData, property: PropertyId) -> PropertyIndexes {
    model
        .property(property)
        .expect("property")
        .property_indexes()
        .expect("finalized")
}

#[test]
fn derived_type_continues_base_property_counter() {
    let fixture = order_model();
    let frozen = fixture.model.finalize(&DefaultIndexPolicy).expect("finalize");

    assert_eq!(indexes(&frozen, fixture.id).index, 0);
    assert_eq!(indexes(&frozen, fixture.total).index, 1);
    assert_eq!(indexes(&frozen, fixture.note).index, 2);

    assert_eq!(frozen.property_count(fixture.order).expect("count"), 2);
    assert_eq!(frozen.property_count(fixture.special_order).expect("count"), 3);
}

#[test]
fn order_layout_under_snapshot() {
    let fixture = order_model();
    let frozen = fixture.model.finalize(&DefaultIndexPolicy).expect("finalize");

    // key: original value and relationship slots, no shadow, not generated
    assert_eq!(indexes(&frozen, fixture.id), PropertyIndexes::new(0, 0, -1, 0, -1));
    assert_eq!(indexes(&frozen, fixture.total), PropertyIndexes::new(1, 1, -1, -1, -1));
    assert_eq!(indexes(&frozen, fixture.note), PropertyIndexes::new(2, 2, -1, -1, -1));

    assert_eq!(
        frozen.counts(fixture.special_order).expect("counts"),
        PropertyCounts::new(3, 0, 3, 0, 1, 0)
    );
}

#[test]
fn empty_root_type_has_zero_counts() {
    let mut model = MutableModel::new();
    let shape = shape(&mut model, "Empty", None, &[]);
    let empty = model.add_entity_type("Empty", shape, None).expect("Empty");

    let layout = calculate_counts(&model, empty, &DefaultIndexPolicy).expect("layout");
    assert!(layout.counts.is_empty());
    assert!(layout.members.is_empty());
}

#[test]
fn shadow_property_takes_shadow_slot() {
    let mut model = MutableModel::new();
    let (et, _) = keyed_entity(&mut model, "Tag", &[]);
    let audit = model
        .add_property(et, PropertyConfig::new("LastUpdated"))
        .expect("shadow property");

    let layout = calculate_counts(&model, et, &DefaultIndexPolicy).expect("layout");
    let slots = layout
        .indexes_of(MemberRef::Property(audit))
        .expect("declared");
    assert_eq!(slots.shadow_index, 0);
    assert_eq!(layout.counts.shadow_count, 1);
}

#[test]
fn collection_navigation_skips_relationship_slot_when_notifying() {
    let fixture = blog_model(ChangeTrackingStrategy::ChangedNotifications);
    let layout =
        calculate_counts(&fixture.model, fixture.blog, &DefaultIndexPolicy).expect("layout");

    let posts = layout
        .indexes_of(MemberRef::Navigation(fixture.posts))
        .expect("declared");
    assert_eq!(posts.index, 0);
    assert_eq!(posts.relationship_index, NOT_APPLICABLE);
    assert_eq!(posts.original_value_index, NOT_APPLICABLE);
    assert_eq!(posts.store_generation_index, NOT_APPLICABLE);
    assert_eq!(layout.counts.relationship_count, 1);
}

#[test]
fn collection_navigation_keeps_relationship_slot_under_snapshot() {
    let fixture = blog_model(ChangeTrackingStrategy::Snapshot);
    let layout =
        calculate_counts(&fixture.model, fixture.blog, &DefaultIndexPolicy).expect("layout");

    let posts = layout
        .indexes_of(MemberRef::Navigation(fixture.posts))
        .expect("declared");
    assert_eq!(posts.relationship_index, 1);
    assert_eq!(layout.counts.relationship_count, 2);
    assert_eq!(layout.counts.navigation_count, 1);
}

// Blog { Id, Posts } plus a `Tags` skip navigation to Tag
fn tagged_blog(strategy: ChangeTrackingStrategy) -> (BlogFixture, SkipNavigationId) {
    let mut fixture = blog_model(strategy);
    let (tag, _) = keyed_entity(&mut fixture.model, "Tag", &[]);
    let blog_shape = fixture.model.entity_type(fixture.blog).expect("Blog").shape;
    fixture
        .model
        .bind_member(blog_shape, MemberBinding::collection("Tags"))
        .expect("Tags binding");
    let tags = fixture
        .model
        .add_skip_navigation(fixture.blog, SkipNavigationConfig::new("Tags", tag))
        .expect("Tags");

    (fixture, tags)
}

#[test]
fn skip_navigations_follow_navigations_under_snapshot() {
    let (fixture, tags) = tagged_blog(ChangeTrackingStrategy::Snapshot);
    let layout =
        calculate_counts(&fixture.model, fixture.blog, &DefaultIndexPolicy).expect("layout");

    let posts = layout
        .indexes_of(MemberRef::Navigation(fixture.posts))
        .expect("declared");
    let tags = layout
        .indexes_of(MemberRef::SkipNavigation(tags))
        .expect("declared");

    // Id holds relationship slot 0
    assert_eq!(posts, PropertyIndexes::new(0, -1, -1, 1, -1));
    assert_eq!(tags, PropertyIndexes::new(1, -1, -1, 2, -1));
    assert_eq!(layout.counts.navigation_count, 2);
    assert_eq!(layout.counts.relationship_count, 3);
}

#[test]
fn skip_collections_lose_relationship_slot_when_notifying() {
    let (fixture, tags) = tagged_blog(ChangeTrackingStrategy::ChangedNotifications);
    let layout =
        calculate_counts(&fixture.model, fixture.blog, &DefaultIndexPolicy).expect("layout");

    let tags = layout
        .indexes_of(MemberRef::SkipNavigation(tags))
        .expect("declared");
    assert_eq!(tags.index, 1);
    assert_eq!(tags.relationship_index, NOT_APPLICABLE);
    assert_eq!(layout.counts.navigation_count, 2);
    assert_eq!(layout.counts.relationship_count, 1);
}

#[test]
fn derived_skip_navigation_continues_base_navigation_counter() {
    let (mut fixture, _) = tagged_blog(ChangeTrackingStrategy::Snapshot);
    let blog_shape = fixture.model.entity_type(fixture.blog).expect("Blog").shape;
    let featured_shape = fixture
        .model
        .add_shape("FeaturedBlog", Some(blog_shape))
        .expect("shape");
    fixture
        .model
        .bind_member(featured_shape, MemberBinding::collection("Editors"))
        .expect("Editors binding");
    let featured = fixture
        .model
        .add_entity_type("FeaturedBlog", featured_shape, Some(fixture.blog))
        .expect("FeaturedBlog");
    let editors = fixture
        .model
        .add_skip_navigation(featured, SkipNavigationConfig::new("Editors", fixture.post))
        .expect("Editors");

    let frozen = fixture.model.finalize(&DefaultIndexPolicy).expect("finalize");
    let base = frozen.counts(fixture.blog).expect("Blog counts");
    let editors = frozen
        .skip_navigation(editors)
        .expect("Editors")
        .property_indexes()
        .expect("finalized");

    assert_eq!(editors.slot(), Some(base.navigation_count));
    assert_eq!(editors.relationship_slot(), Some(base.relationship_count));
    assert_eq!(frozen.navigation_count(featured).expect("count"), 3);
    assert_eq!(frozen.relationship_property_count(featured).expect("count"), 4);
}

#[test]
fn changing_notifications_keep_originals_only_for_keys_and_tokens() {
    let mut fixture = blog_model(ChangeTrackingStrategy::ChangingAndChangedNotifications);
    let title = fixture
        .model
        .add_property(fixture.blog, PropertyConfig::new("Title"))
        .expect("Title");
    let version = fixture
        .model
        .add_property(fixture.blog, PropertyConfig::new("Version").concurrency_token())
        .expect("Version");

    let policy = DefaultIndexPolicy;
    assert!(policy
        .requires_original_value(&fixture.model, fixture.blog_id)
        .expect("key"));
    assert!(!policy
        .requires_original_value(&fixture.model, title)
        .expect("title"));
    assert!(policy
        .requires_original_value(&fixture.model, version)
        .expect("token"));

    fixture
        .model
        .add_index(fixture.blog, &[title], true)
        .expect("unique index");
    assert!(policy
        .requires_original_value(&fixture.model, title)
        .expect("unique member"));
}

#[test]
fn foreign_key_inherits_store_generation_from_principal() {
    let mut model = MutableModel::new();

    let blog_shape = shape(&mut model, "Blog", None, &["Id"]);
    let blog = model.add_entity_type("Blog", blog_shape, None).expect("Blog");
    let blog_id = model
        .add_property(blog, PropertyConfig::new("Id").value_generated(ValueGenerated::OnAdd))
        .expect("Id");
    let blog_pk = model.set_primary_key(blog, &[blog_id]).expect("key");

    let (post, _) = keyed_entity(&mut model, "Post", &["BlogId"]);
    let blog_ref = model
        .add_property(post, PropertyConfig::new("BlogId"))
        .expect("BlogId");
    model
        .add_foreign_key(post, &[blog_ref], blog_pk, ForeignKeyOptions::default())
        .expect("fk");

    assert_eq!(
        find_generation_property(&model, blog_ref).expect("search"),
        Some(blog_id)
    );

    let layout = calculate_counts(&model, post, &DefaultIndexPolicy).expect("layout");
    let slots = layout
        .indexes_of(MemberRef::Property(blog_ref))
        .expect("declared");
    assert_eq!(slots.store_generation_index, 0);
    assert_eq!(layout.counts.store_generated_count, 1);
}

#[test]
fn client_generated_values_are_not_store_generated() {
    let mut model = MutableModel::new();
    let shape = shape(&mut model, "Token", None, &["Id"]);
    let et = model.add_entity_type("Token", shape, None).expect("Token");
    let id = model
        .add_property(
            et,
            PropertyConfig::new("Id")
                .value_generated(ValueGenerated::OnAdd)
                .client_generated(),
        )
        .expect("Id");

    assert!(!DefaultIndexPolicy
        .may_be_store_generated(&model, id)
        .expect("policy"));
}

#[test]
fn service_properties_occupy_no_slots() {
    let mut model = MutableModel::new();
    let (et, _) = keyed_entity(&mut model, "Session", &[]);
    let service = model
        .add_service_property(et, "Context")
        .expect("service property");

    let layout = calculate_counts(&model, et, &DefaultIndexPolicy).expect("layout");
    assert_eq!(
        layout.indexes_of(MemberRef::ServiceProperty(service)),
        Some(PropertyIndexes::NONE)
    );
    assert_eq!(layout.counts.property_count, 1);
}

#[test]
fn recalculating_a_finalized_model_is_identical() {
    let fixture = order_model();
    let frozen = fixture.model.finalize(&DefaultIndexPolicy).expect("finalize");

    for (id, _) in frozen.entity_types() {
        let layout = calculate_counts(&frozen, id, &DefaultIndexPolicy).expect("layout");
        assert_eq!(Some(layout.counts), frozen.entity_type(id).expect("type").counts());

        for (member, slots) in &layout.members {
            assert_eq!(frozen.member_indexes(*member).expect("member"), Some(*slots));
        }
    }
}

#[test]
fn derived_type_counts_do_not_depend_on_visit_order() {
    let mut fixture = order_model();

    // derived first: the base is computed on the fly
    let derived = assign_counts(&mut fixture.model, fixture.special_order, &DefaultIndexPolicy)
        .expect("derived");
    let base = assign_counts(&mut fixture.model, fixture.order, &DefaultIndexPolicy)
        .expect("base");

    assert_eq!(derived.property_count, 3);
    assert_eq!(base.property_count, 2);
}

///
/// OnlyKeysPolicy
///

struct OnlyKeysPolicy;

impl IndexPolicy for OnlyKeysPolicy {
    fn requires_original_value(
        &self,
        model: &ModelData,
        property: PropertyId,
    ) -> Result<bool, ModelError> {
        Ok(model.property(property)?.is_key())
    }

    fn may_be_store_generated(&self, _: &ModelData, _: PropertyId) -> Result<bool, ModelError> {
        Ok(false)
    }
}

#[test]
fn custom_policy_controls_optional_slots() {
    let fixture = order_model();
    let frozen = fixture.model.finalize(&OnlyKeysPolicy).expect("finalize");

    assert_eq!(indexes(&frozen, fixture.id).original_value_index, 0);
    assert_eq!(indexes(&frozen, fixture.total).original_value_index, NOT_APPLICABLE);
    assert_eq!(frozen.original_value_count(fixture.special_order).expect("count"), 1);
}

//
// hierarchy properties
//

#[derive(Clone, Debug)]
struct Level {
    bound: usize,
    shadow: usize,
}

fn arb_level() -> impl Strategy<Value = Level> {
    (0..4usize, 0..3usize).prop_map(|(bound, shadow)| Level { bound, shadow })
}

// build a single inheritance line, root first
fn build_line(levels: &[Level]) -> (MutableModel, Vec<EntityTypeId>) {
    let mut model = MutableModel::new();
    let mut types = Vec::new();
    let mut base: Option<(EntityTypeId, ShapeId)> = None;

    for (depth, level) in levels.iter().enumerate() {
        let shape_id = model
            .add_shape(format!("Level{depth}"), base.map(|(_, s)| s))
            .expect("shape");
        for i in 0..level.bound {
            model
                .bind_member(shape_id, MemberBinding::property(format!("P{depth}_{i}")))
                .expect("bind");
        }

        let et = model
            .add_entity_type(format!("Level{depth}"), shape_id, base.map(|(et, _)| et))
            .expect("entity type");
        for i in 0..level.bound {
            model
                .add_property(et, PropertyConfig::new(format!("P{depth}_{i}")))
                .expect("bound property");
        }
        for i in 0..level.shadow {
            model
                .add_property(et, PropertyConfig::new(format!("S{depth}_{i}")))
                .expect("shadow property");
        }

        types.push(et);
        base = Some((et, shape_id));
    }

    (model, types)
}

fn slot_values(slots: PropertyIndexes) -> [i32; 5] {
    [
        slots.index,
        slots.original_value_index,
        slots.shadow_index,
        slots.relationship_index,
        slots.store_generation_index,
    ]
}

proptest! {
    #[test]
    fn base_slots_sort_before_derived_slots(levels in prop::collection::vec(arb_level(), 1..5)) {
        let (model, types) = build_line(&levels);
        let frozen = model.finalize(&DefaultIndexPolicy).expect("finalize");

        for pair in types.windows(2) {
            let (base, derived) = (pair[0], pair[1]);

            let base_max = frozen
                .properties(base)
                .expect("base properties")
                .into_iter()
                .map(|p| slot_values(indexes(&frozen, p)))
                .fold([-1; 5], |acc, s| std::array::from_fn(|i| acc[i].max(s[i])));

            for &p in frozen.entity_type(derived).expect("derived").declared_properties() {
                let own = slot_values(indexes(&frozen, p));
                for (slot, max) in own.into_iter().zip(base_max) {
                    if slot != NOT_APPLICABLE {
                        prop_assert!(slot > max);
                    }
                }
            }
        }
    }

    #[test]
    fn assigned_slots_stay_below_totals(levels in prop::collection::vec(arb_level(), 1..5)) {
        let (model, types) = build_line(&levels);
        let frozen = model.finalize(&DefaultIndexPolicy).expect("finalize");

        for &et in &types {
            let counts = frozen.counts(et).expect("counts");
            let totals = [
                counts.property_count,
                counts.original_value_count,
                counts.shadow_count,
                counts.relationship_count,
                counts.store_generated_count,
            ];

            for p in frozen.properties(et).expect("properties") {
                for (slot, total) in slot_values(indexes(&frozen, p)).into_iter().zip(totals) {
                    prop_assert!(slot < i32::try_from(total).expect("fits"));
                }
            }
        }
    }
}
