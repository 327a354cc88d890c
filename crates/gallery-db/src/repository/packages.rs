//! Package registration and package queries.

use diesel::prelude::*;

use crate::{
    models::{
        Package, PackageAuthor, PackageDependency, PackageRegistration, PackageStatistics, User,
    },
    schema::{
        package_authors, package_dependencies, package_registration_owners, package_registrations,
        package_statistics, packages, users,
    },
};

/// Repository for package registration operations.
pub struct PackagesRepository;

impl PackagesRepository {
    /// Lists all package registrations.
    pub fn list_registrations(
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<PackageRegistration>> {
        package_registrations::table
            .select(PackageRegistration::as_select())
            .load(conn)
    }

    /// Finds a registration by its package id.
    pub fn find_registration(
        conn: &mut SqliteConnection,
        pkg_id: &str,
    ) -> QueryResult<Option<PackageRegistration>> {
        package_registrations::table
            .filter(package_registrations::pkg_id.eq(pkg_id))
            .select(PackageRegistration::as_select())
            .first(conn)
            .optional()
    }

    /// Versions published under a registration.
    pub fn packages_of(
        conn: &mut SqliteConnection,
        registration_key: i32,
    ) -> QueryResult<Vec<Package>> {
        packages::table
            .filter(packages::package_registration_id.eq(registration_key))
            .select(Package::as_select())
            .load(conn)
    }

    /// Latest package of every registration, joined to its registration.
    pub fn latest_packages(
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<(Package, PackageRegistration)>> {
        packages::table
            .inner_join(package_registrations::table)
            .filter(packages::is_latest.eq(true))
            .select((Package::as_select(), PackageRegistration::as_select()))
            .load(conn)
    }

    /// Users owning a registration, through the join table.
    pub fn owners_of(conn: &mut SqliteConnection, registration_key: i32) -> QueryResult<Vec<User>> {
        package_registration_owners::table
            .inner_join(users::table)
            .filter(package_registration_owners::package_registration_id.eq(registration_key))
            .select(User::as_select())
            .load(conn)
    }

    /// Declared authors of a package version.
    pub fn authors_of(
        conn: &mut SqliteConnection,
        package_key: i32,
    ) -> QueryResult<Vec<PackageAuthor>> {
        package_authors::table
            .filter(package_authors::package_id.eq(package_key))
            .select(PackageAuthor::as_select())
            .load(conn)
    }

    /// Declared dependencies of a package version.
    pub fn dependencies_of(
        conn: &mut SqliteConnection,
        package_key: i32,
    ) -> QueryResult<Vec<PackageDependency>> {
        package_dependencies::table
            .filter(package_dependencies::package_id.eq(package_key))
            .select(PackageDependency::as_select())
            .load(conn)
    }

    /// Download statistics recorded for a package version.
    pub fn download_statistics_of(
        conn: &mut SqliteConnection,
        package_key: i32,
    ) -> QueryResult<Vec<PackageStatistics>> {
        package_statistics::table
            .filter(package_statistics::package_id.eq(package_key))
            .select(PackageStatistics::as_select())
            .load(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        helpers::to_json,
        migration::apply_migrations,
        models::{
            NewPackage, NewPackageAuthor, NewPackageDependency, NewPackageRegistration, NewUser,
            PackageRegistrationOwner,
        },
    };

    fn setup_conn() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    fn insert_registration(conn: &mut SqliteConnection, pkg_id: &str) -> i32 {
        diesel::insert_into(package_registrations::table)
            .values(&NewPackageRegistration {
                pkg_id: pkg_id.to_string(),
                download_count: 0,
            })
            .returning(package_registrations::id)
            .get_result(conn)
            .unwrap()
    }

    fn insert_package(
        conn: &mut SqliteConnection,
        registration_key: i32,
        version: &str,
        is_latest: bool,
    ) -> i32 {
        diesel::insert_into(packages::table)
            .values(&NewPackage {
                package_registration_id: registration_key,
                version: version.to_string(),
                created_date: "2011-07-01T00:00:00Z".to_string(),
                listed: true,
                is_latest,
                hash: "abc123".to_string(),
                hash_algorithm: "SHA512".to_string(),
                tags: Some(to_json(&vec!["web".to_string(), "json".to_string()])),
                ..NewPackage::default()
            })
            .returning(packages::id)
            .get_result(conn)
            .unwrap()
    }

    #[test]
    fn test_packages_of_registration() {
        let mut conn = setup_conn();
        let reg = insert_registration(&mut conn, "Newtonsoft.Json");
        insert_package(&mut conn, reg, "1.0.0", false);
        insert_package(&mut conn, reg, "2.0.0", true);

        let versions = PackagesRepository::packages_of(&mut conn, reg).unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].tags, Some(vec!["web".to_string(), "json".to_string()]));
    }

    #[test]
    fn test_latest_packages_joins_registrations() {
        let mut conn = setup_conn();
        let reg = insert_registration(&mut conn, "Newtonsoft.Json");
        insert_package(&mut conn, reg, "1.0.0", false);
        insert_package(&mut conn, reg, "2.0.0", true);

        let latest = PackagesRepository::latest_packages(&mut conn).unwrap();
        assert_eq!(latest.len(), 1);
        let (package, registration) = &latest[0];
        assert_eq!(package.version, "2.0.0");
        assert_eq!(registration.pkg_id, "Newtonsoft.Json");
    }

    #[test]
    fn test_owners_through_join_table() {
        let mut conn = setup_conn();
        let reg = insert_registration(&mut conn, "Moq");

        let owner: i32 = diesel::insert_into(users::table)
            .values(&NewUser {
                username: "alice".to_string(),
                email_allowed: true,
                created_date: "2011-07-01T00:00:00Z".to_string(),
                ..NewUser::default()
            })
            .returning(users::id)
            .get_result(&mut conn)
            .unwrap();

        diesel::insert_into(package_registration_owners::table)
            .values(&PackageRegistrationOwner {
                package_registration_id: reg,
                user_id: owner,
            })
            .execute(&mut conn)
            .unwrap();

        let owners = PackagesRepository::owners_of(&mut conn, reg).unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].username, "alice");
    }

    #[test]
    fn test_authors_and_dependencies_of_package() {
        let mut conn = setup_conn();
        let reg = insert_registration(&mut conn, "Moq");
        let pkg = insert_package(&mut conn, reg, "4.0.0", true);

        diesel::insert_into(package_authors::table)
            .values(&NewPackageAuthor {
                package_id: pkg,
                name: "Daniel".to_string(),
            })
            .execute(&mut conn)
            .unwrap();

        diesel::insert_into(package_dependencies::table)
            .values(&NewPackageDependency {
                package_id: pkg,
                dependency_id: "Castle.Core".to_string(),
                version_spec: Some("[2.5.2, 3.0.0)".to_string()),
                target_framework: None,
            })
            .execute(&mut conn)
            .unwrap();

        let authors = PackagesRepository::authors_of(&mut conn, pkg).unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].name, "Daniel");

        let deps = PackagesRepository::dependencies_of(&mut conn, pkg).unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].dependency_id, "Castle.Core");
    }

    #[test]
    fn test_find_registration_by_pkg_id() {
        let mut conn = setup_conn();
        insert_registration(&mut conn, "Moq");

        assert!(PackagesRepository::find_registration(&mut conn, "Moq")
            .unwrap()
            .is_some());
        assert!(PackagesRepository::find_registration(&mut conn, "Nope")
            .unwrap()
            .is_none());
    }
}
