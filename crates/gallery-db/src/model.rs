//! Relational model catalog.
//!
//! A declarative description of every mapped entity: its table, surrogate
//! key, and declared relations, including the join table behind each
//! many-to-many relation. The catalog is built exactly once per process by
//! [`relational_model`] and consumed by schema verification after
//! migrations and by tests.

use std::sync::OnceLock;

/// A declared relation of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationDef {
    /// The child table holds a foreign key back to this entity.
    HasMany {
        child_table: &'static str,
        foreign_key: &'static str,
        required: bool,
    },
    /// This entity's table holds a foreign key to the parent.
    BelongsTo {
        parent_table: &'static str,
        foreign_key: &'static str,
        required: bool,
    },
    /// Materialized through a two-column join table.
    ManyToMany { join_table: &'static str },
}

/// A mapped entity: one relational table plus its declared relations.
#[derive(Debug, Clone)]
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    pub key: &'static str,
    pub relations: Vec<RelationDef>,
}

/// A join table implementing a many-to-many relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinTableDef {
    pub table: &'static str,
    pub left_table: &'static str,
    pub left_key: &'static str,
    pub right_table: &'static str,
    pub right_key: &'static str,
}

#[derive(Debug, Clone)]
pub struct RelationalModel {
    pub entities: Vec<EntityDef>,
    pub join_tables: Vec<JoinTableDef>,
}

impl RelationalModel {
    pub fn entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn join_table(&self, table: &str) -> Option<&JoinTableDef> {
        self.join_tables.iter().find(|j| j.table == table)
    }

    /// All table names the model maps: entity tables plus join tables.
    pub fn table_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entities
            .iter()
            .map(|e| e.table)
            .chain(self.join_tables.iter().map(|j| j.table))
    }
}

static MODEL: OnceLock<RelationalModel> = OnceLock::new();

/// Returns the relational model, building it on first call.
pub fn relational_model() -> &'static RelationalModel {
    MODEL.get_or_init(build_model)
}

fn entity(name: &'static str, table: &'static str, relations: Vec<RelationDef>) -> EntityDef {
    EntityDef {
        name,
        table,
        key: "id",
        relations,
    }
}

fn build_model() -> RelationalModel {
    let entities = vec![
        entity(
            "User",
            "users",
            vec![
                RelationDef::HasMany {
                    child_table: "email_messages",
                    foreign_key: "to_user_id",
                    required: true,
                },
                RelationDef::ManyToMany {
                    join_table: "user_roles",
                },
            ],
        ),
        entity("Role", "roles", vec![]),
        entity(
            "EmailMessage",
            "email_messages",
            vec![RelationDef::BelongsTo {
                parent_table: "users",
                foreign_key: "from_user_id",
                required: false,
            }],
        ),
        entity(
            "PackageRegistration",
            "package_registrations",
            vec![
                RelationDef::HasMany {
                    child_table: "packages",
                    foreign_key: "package_registration_id",
                    required: true,
                },
                RelationDef::ManyToMany {
                    join_table: "package_registration_owners",
                },
            ],
        ),
        entity(
            "Package",
            "packages",
            vec![
                RelationDef::HasMany {
                    child_table: "package_authors",
                    foreign_key: "package_id",
                    required: true,
                },
                RelationDef::HasMany {
                    child_table: "package_statistics",
                    foreign_key: "package_id",
                    required: true,
                },
                RelationDef::HasMany {
                    child_table: "package_dependencies",
                    foreign_key: "package_id",
                    required: true,
                },
            ],
        ),
        entity("PackageAuthor", "package_authors", vec![]),
        entity("PackageStatistics", "package_statistics", vec![]),
        entity("PackageDependency", "package_dependencies", vec![]),
        entity("GallerySetting", "gallery_settings", vec![]),
        entity("PackageOwnerRequest", "package_owner_requests", vec![]),
        entity("PackageFramework", "package_frameworks", vec![]),
        entity(
            "CuratedFeed",
            "curated_feeds",
            vec![
                RelationDef::HasMany {
                    child_table: "curated_packages",
                    foreign_key: "curated_feed_id",
                    required: true,
                },
                RelationDef::ManyToMany {
                    join_table: "curated_feed_managers",
                },
            ],
        ),
        entity(
            "CuratedPackage",
            "curated_packages",
            vec![RelationDef::BelongsTo {
                parent_table: "package_registrations",
                foreign_key: "package_registration_id",
                required: true,
            }],
        ),
    ];

    let join_tables = vec![
        JoinTableDef {
            table: "user_roles",
            left_table: "users",
            left_key: "user_id",
            right_table: "roles",
            right_key: "role_id",
        },
        JoinTableDef {
            table: "package_registration_owners",
            left_table: "package_registrations",
            left_key: "package_registration_id",
            right_table: "users",
            right_key: "user_id",
        },
        JoinTableDef {
            table: "curated_feed_managers",
            left_table: "curated_feeds",
            left_key: "curated_feed_id",
            right_table: "users",
            right_key: "user_id",
        },
    ];

    RelationalModel {
        entities,
        join_tables,
    }
}
