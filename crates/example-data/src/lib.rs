//! Deterministic example data for the library backend.
//!
//! First runs of the backend (and demos) want a recognisable catalogue and a
//! working administrator account without reaching for random generation, so
//! every value here is a literal: re-seeding always produces the same
//! records, in the same order.

use serde::Serialize;

/// One catalogue entry of the example seed.
///
/// `total` is the copy count the library owns; seeded stock always equals
/// `total` because the seed ships with an empty loan ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBook {
    /// Unique ISBN-13 of the title.
    pub isbn: &'static str,
    /// Title shown in listings.
    pub title: &'static str,
    /// Primary author.
    pub author: &'static str,
    /// Publishing house.
    pub publisher: &'static str,
    /// Shelving category.
    pub category: &'static str,
    /// List price in currency units.
    pub price: f64,
    /// Copies owned by the library.
    pub total: u32,
    /// Publication date, `YYYY-MM-DD`.
    pub publish_date: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Administrator account of the example seed.
///
/// The password is plaintext here; the backend digests it when seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedUser {
    /// Login name.
    pub username: &'static str,
    /// Plaintext password, digested at seed time.
    pub password: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Contact email.
    pub email: &'static str,
    /// Contact phone number.
    pub phone: &'static str,
}

/// The example catalogue, spanning four categories.
pub const CATALOGUE: [SeedBook; 8] = [
    SeedBook {
        isbn: "978-0-13-595705-9",
        title: "The Pragmatic Programmer",
        author: "David Thomas",
        publisher: "Addison-Wesley",
        category: "Computing",
        price: 49.99,
        total: 10,
        publish_date: "2019-09-13",
        description: "Your journey to mastery, 20th anniversary edition",
    },
    SeedBook {
        isbn: "978-0-262-51087-5",
        title: "Structure and Interpretation of Computer Programs",
        author: "Harold Abelson",
        publisher: "MIT Press",
        category: "Computing",
        price: 54.0,
        total: 8,
        publish_date: "1996-07-25",
        description: "The classic introduction to programming with Scheme",
    },
    SeedBook {
        isbn: "978-1-4493-7332-0",
        title: "Designing Data-Intensive Applications",
        author: "Martin Kleppmann",
        publisher: "O'Reilly Media",
        category: "Computing",
        price: 59.99,
        total: 5,
        publish_date: "2017-03-16",
        description: "The big ideas behind reliable, scalable systems",
    },
    SeedBook {
        isbn: "978-0-14-143951-8",
        title: "Pride and Prejudice",
        author: "Jane Austen",
        publisher: "Penguin Classics",
        category: "Literature",
        price: 9.99,
        total: 15,
        publish_date: "2002-12-31",
        description: "Austen's celebrated novel of manners",
    },
    SeedBook {
        isbn: "978-0-06-088328-7",
        title: "One Hundred Years of Solitude",
        author: "Gabriel Garcia Marquez",
        publisher: "Harper Perennial",
        category: "Literature",
        price: 17.99,
        total: 10,
        publish_date: "2006-02-21",
        description: "The landmark of magical realism",
    },
    SeedBook {
        isbn: "978-0-06-231609-7",
        title: "Sapiens: A Brief History of Humankind",
        author: "Yuval Noah Harari",
        publisher: "Harper",
        category: "History",
        price: 24.99,
        total: 12,
        publish_date: "2015-02-10",
        description: "From the cognitive revolution to the scientific one",
    },
    SeedBook {
        isbn: "978-1-305-58512-6",
        title: "Principles of Economics",
        author: "N. Gregory Mankiw",
        publisher: "Cengage Learning",
        category: "Economics",
        price: 128.0,
        total: 8,
        publish_date: "2015-05-01",
        description: "The standard introductory economics text",
    },
    SeedBook {
        isbn: "978-0-7653-8203-0",
        title: "The Three-Body Problem",
        author: "Liu Cixin",
        publisher: "Tor Books",
        category: "Science Fiction",
        price: 16.99,
        total: 20,
        publish_date: "2016-01-12",
        description: "First contact on the scale of civilisations",
    },
];

/// The seeded administrator account.
pub const ADMINISTRATOR: SeedUser = SeedUser {
    username: "admin",
    password: "admin123",
    name: "System Administrator",
    email: "admin@library.local",
    phone: "000-0000-0000",
};
