//! Deterministic dataset generation from a plan.
//!
//! The plan's seed initialises a ChaCha8 RNG, so the same plan always yields
//! byte-for-byte identical records. Draw order is fixed: all clients, then a
//! (product, transaction) pair per client, then all suppliers.

use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::raw::{CatchPhrase, CompanyName};
use fake::faker::lorem::raw::Paragraph;
use fake::faker::name::raw::Name;
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use uuid::{Builder, Uuid};

use crate::error::GenerationError;
use crate::plan::{DatasetPlan, MAX_ROWS_PER_ENTITY};
use crate::records::{
    ClientRecord, ProductRecord, SupplierRecord, SyntheticDataset, TransactionRecord,
};
use crate::text::{is_single_line_text, normalize_single_line};

/// Maximum number of attempts to produce a valid free-text value.
const MAX_TEXT_ATTEMPTS: usize = 16;

/// Smallest five-digit value, used for amounts and price cents.
const FIVE_DIGIT_MIN: i64 = 10_000;

/// Largest five-digit value, used for amounts and price cents.
const FIVE_DIGIT_MAX: i64 = 99_999;

/// Fractional digits carried by generated prices.
const PRICE_SCALE: u32 = 2;

/// Days between 1970-01-01 and 2025-12-31 inclusive of the end date.
const DATE_SPAN_DAYS: u64 = 20_453;

/// Range of sentences in a generated product description.
const DESCRIPTION_SENTENCES: std::ops::Range<usize> = 1..3;

/// Generates a complete dataset from a plan.
///
/// For every client exactly one product and one transaction are generated;
/// the transaction references both. Suppliers are generated last and are not
/// referenced by anything.
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - A requested count exceeds [`MAX_ROWS_PER_ENTITY`]
/// - A free-text field cannot be produced within the retry budget
///
/// # Example
///
/// ```
/// use synthetic_data::{DatasetPlan, generate_dataset};
///
/// let plan = DatasetPlan::new(7, 2, 1);
/// let first = generate_dataset(&plan).expect("generated");
/// let second = generate_dataset(&plan).expect("generated");
///
/// // Same plan produces identical data
/// assert_eq!(first, second);
/// assert_eq!(first.transactions[0].client_id, first.clients[0].id);
/// assert_eq!(first.transactions[0].product_id, first.products[0].id);
/// ```
pub fn generate_dataset(plan: &DatasetPlan) -> Result<SyntheticDataset, GenerationError> {
    ensure_count_in_range("client", plan.client_count())?;
    ensure_count_in_range("supplier", plan.supplier_count())?;

    let first_date = NaiveDate::from_ymd_opt(1970, 1, 1).ok_or(GenerationError::DateOutOfRange)?;
    let mut rng = ChaCha8Rng::seed_from_u64(plan.seed());

    let mut clients = Vec::with_capacity(plan.client_count());
    for _ in 0..plan.client_count() {
        clients.push(generate_client(&mut rng)?);
    }

    let mut products = Vec::with_capacity(clients.len());
    let mut transactions = Vec::with_capacity(clients.len());
    for client in &clients {
        let product = generate_product(&mut rng)?;
        let transaction = generate_transaction(&mut rng, first_date, client.id, product.id)?;
        products.push(product);
        transactions.push(transaction);
    }

    let mut suppliers = Vec::with_capacity(plan.supplier_count());
    for _ in 0..plan.supplier_count() {
        suppliers.push(generate_supplier(&mut rng)?);
    }

    Ok(SyntheticDataset {
        clients,
        products,
        transactions,
        suppliers,
    })
}

fn ensure_count_in_range(entity: &'static str, requested: usize) -> Result<(), GenerationError> {
    if requested > MAX_ROWS_PER_ENTITY {
        return Err(GenerationError::CountTooLarge {
            entity,
            requested,
            max: MAX_ROWS_PER_ENTITY,
        });
    }
    Ok(())
}

fn generate_client(rng: &mut ChaCha8Rng) -> Result<ClientRecord, GenerationError> {
    let id = generate_id(rng);
    let name = generate_text(rng, "client name", |source| Name(EN).fake_with_rng(source))?;
    let address = generate_text(rng, "client address", raw_address)?;
    Ok(ClientRecord { id, name, address })
}

fn generate_product(rng: &mut ChaCha8Rng) -> Result<ProductRecord, GenerationError> {
    let id = generate_id(rng);
    let name = generate_text(rng, "product name", |source| {
        CatchPhrase(EN).fake_with_rng(source)
    })?;
    let description = generate_text(rng, "product description", |source| {
        Paragraph(EN, DESCRIPTION_SENTENCES).fake_with_rng(source)
    })?;
    let price = Decimal::new(
        rng.random_range(FIVE_DIGIT_MIN..=FIVE_DIGIT_MAX),
        PRICE_SCALE,
    );
    Ok(ProductRecord {
        id,
        name,
        description,
        price,
    })
}

fn generate_transaction(
    rng: &mut ChaCha8Rng,
    first_date: NaiveDate,
    client_id: Uuid,
    product_id: Uuid,
) -> Result<TransactionRecord, GenerationError> {
    let id = generate_id(rng);
    let offset = rng.random_range(0..=DATE_SPAN_DAYS);
    let date = first_date
        .checked_add_days(Days::new(offset))
        .ok_or(GenerationError::DateOutOfRange)?;
    let amount = rng.random_range(FIVE_DIGIT_MIN..=FIVE_DIGIT_MAX);
    Ok(TransactionRecord {
        id,
        client_id,
        product_id,
        date,
        amount,
    })
}

fn generate_supplier(rng: &mut ChaCha8Rng) -> Result<SupplierRecord, GenerationError> {
    let id = generate_id(rng);
    let name = generate_text(rng, "supplier name", |source| {
        CompanyName(EN).fake_with_rng(source)
    })?;
    let address = generate_text(rng, "supplier address", raw_address)?;
    Ok(SupplierRecord { id, name, address })
}

/// Draws a version 4 UUID from the RNG so identifiers are reproducible.
fn generate_id(rng: &mut ChaCha8Rng) -> Uuid {
    Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Produces a multi-line postal address; callers flatten it.
fn raw_address(rng: &mut ChaCha8Rng) -> String {
    let building: String = BuildingNumber(EN).fake_with_rng(rng);
    let street: String = StreetName(EN).fake_with_rng(rng);
    let city: String = CityName(EN).fake_with_rng(rng);
    let state: String = StateAbbr(EN).fake_with_rng(rng);
    let zip: String = ZipCode(EN).fake_with_rng(rng);
    format!("{building} {street}\n{city}, {state} {zip}")
}

/// Generates a single-line text value, retrying until it validates.
fn generate_text<F>(
    rng: &mut ChaCha8Rng,
    field: &'static str,
    mut produce: F,
) -> Result<String, GenerationError>
where
    F: FnMut(&mut ChaCha8Rng) -> String,
{
    for _ in 0..MAX_TEXT_ATTEMPTS {
        let candidate = normalize_single_line(&produce(rng));
        if is_single_line_text(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::TextGenerationFailed {
        field,
        max_attempts: MAX_TEXT_ATTEMPTS,
    })
}
