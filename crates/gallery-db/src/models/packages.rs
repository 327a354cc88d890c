use diesel::{prelude::*, sqlite::Sqlite};
use serde_json::Value;

use crate::schema::{
    gallery_settings, package_authors, package_dependencies, package_frameworks,
    package_owner_requests, package_registration_owners, package_registrations,
    package_statistics, packages,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_registrations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PackageRegistration {
    pub id: i32,
    pub pkg_id: String,
    pub download_count: i64,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = package_registrations)]
pub struct NewPackageRegistration {
    pub pkg_id: String,
    pub download_count: i64,
}

#[derive(Debug, Clone, Selectable)]
#[diesel(table_name = packages)]
pub struct Package {
    pub id: i32,
    pub package_registration_id: i32,
    pub version: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_notes: Option<String>,
    pub copyright: Option<String>,
    pub created_date: String,
    pub published_date: Option<String>,
    pub listed: bool,
    pub is_latest: bool,
    pub is_latest_stable: bool,
    pub is_prerelease: bool,
    pub download_count: i64,
    pub package_file_size: i64,
    pub hash: String,
    pub hash_algorithm: String,
    pub requires_license_acceptance: bool,
    pub language: Option<String>,
    pub flattened_authors: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Queryable<packages::SqlType, Sqlite> for Package {
    type Row = (
        i32,
        i32,
        String,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
        String,
        Option<String>,
        bool,
        bool,
        bool,
        bool,
        i64,
        i64,
        String,
        String,
        bool,
        Option<String>,
        Option<String>,
        Option<Value>,
    );

    fn build(row: Self::Row) -> diesel::deserialize::Result<Self> {
        Ok(Self {
            id: row.0,
            package_registration_id: row.1,
            version: row.2,
            title: row.3,
            description: row.4,
            release_notes: row.5,
            copyright: row.6,
            created_date: row.7,
            published_date: row.8,
            listed: row.9,
            is_latest: row.10,
            is_latest_stable: row.11,
            is_prerelease: row.12,
            download_count: row.13,
            package_file_size: row.14,
            hash: row.15,
            hash_algorithm: row.16,
            requires_license_acceptance: row.17,
            language: row.18,
            flattened_authors: row.19,
            tags: row
                .20
                .map(|v| serde_json::from_value(v).unwrap_or_default()),
        })
    }
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = packages)]
pub struct NewPackage {
    pub package_registration_id: i32,
    pub version: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_notes: Option<String>,
    pub copyright: Option<String>,
    pub created_date: String,
    pub published_date: Option<String>,
    pub listed: bool,
    pub is_latest: bool,
    pub is_latest_stable: bool,
    pub is_prerelease: bool,
    pub download_count: i64,
    pub package_file_size: i64,
    pub hash: String,
    pub hash_algorithm: String,
    pub requires_license_acceptance: bool,
    pub language: Option<String>,
    pub flattened_authors: Option<String>,
    pub tags: Option<Value>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_authors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PackageAuthor {
    pub id: i32,
    pub package_id: i32,
    pub name: String,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = package_authors)]
pub struct NewPackageAuthor {
    pub package_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_statistics)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PackageStatistics {
    pub id: i32,
    pub package_id: i32,
    pub timestamp: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub operation: Option<String>,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = package_statistics)]
pub struct NewPackageStatistics {
    pub package_id: i32,
    pub timestamp: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub operation: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_dependencies)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PackageDependency {
    pub id: i32,
    pub package_id: i32,
    pub dependency_id: String,
    pub version_spec: Option<String>,
    pub target_framework: Option<String>,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = package_dependencies)]
pub struct NewPackageDependency {
    pub package_id: i32,
    pub dependency_id: String,
    pub version_spec: Option<String>,
    pub target_framework: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_frameworks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PackageFramework {
    pub id: i32,
    pub package_id: i32,
    pub target_framework: String,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = package_frameworks)]
pub struct NewPackageFramework {
    pub package_id: i32,
    pub target_framework: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = gallery_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GallerySetting {
    pub id: i32,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = gallery_settings)]
pub struct NewGallerySetting {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_owner_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PackageOwnerRequest {
    pub id: i32,
    pub package_registration_id: i32,
    pub new_owner_id: i32,
    pub requesting_owner_id: i32,
    pub confirmation_code: String,
    pub request_date: String,
}

#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = package_owner_requests)]
pub struct NewPackageOwnerRequest {
    pub package_registration_id: i32,
    pub new_owner_id: i32,
    pub requesting_owner_id: i32,
    pub confirmation_code: String,
    pub request_date: String,
}

/// Join row tying a package registration to an owning user.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = package_registration_owners)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PackageRegistrationOwner {
    pub package_registration_id: i32,
    pub user_id: i32,
}
