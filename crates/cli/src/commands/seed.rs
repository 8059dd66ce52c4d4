//! Seed a running server with sample CRM data over HTTP.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::{info, warn};

use clementine_core::{
    CreateCustomerInput, CreateOrderInput, CreateProductInput, Customer, Order, Product,
};

/// Predefined sample customers `(name, email, phone)`.
const SAMPLE_CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Alice Johnson", "alice.johnson@example.com", "+1234567890"),
    ("Bob Smith", "bob.smith@example.com", "123-456-7890"),
    ("Carol Williams", "carol.williams@example.com", "+1987654321"),
    ("David Brown", "david.brown@example.com", "987-654-3210"),
    ("Eva Davis", "eva.davis@example.com", "+1122334455"),
    ("Frank Miller", "frank.miller@example.com", "555-123-4567"),
    ("Grace Wilson", "grace.wilson@example.com", "+1999888777"),
    ("Henry Taylor", "henry.taylor@example.com", "444-555-6666"),
    ("Ivy Anderson", "ivy.anderson@example.com", "+1777666555"),
    ("Jack Thomas", "jack.thomas@example.com", "333-222-1111"),
    ("Karen White", "karen.white@example.com", "+1555444333"),
    ("Liam Garcia", "liam.garcia@example.com", "666-777-8888"),
    ("Mia Rodriguez", "mia.rodriguez@example.com", "+1888999000"),
    ("Noah Martinez", "noah.martinez@example.com", "111-222-3333"),
    ("Olivia Hernandez", "olivia.hernandez@example.com", "+1444555666"),
];

/// Predefined sample products `(name, price, stock)`.
const SAMPLE_PRODUCTS: &[(&str, &str, i64)] = &[
    ("MacBook Pro 16\"", "2499.99", 15),
    ("Dell XPS 13", "1299.99", 25),
    ("iPhone 15 Pro", "999.99", 50),
    ("Samsung Galaxy S24", "899.99", 40),
    ("iPad Air", "599.99", 30),
    ("AirPods Pro", "249.99", 100),
    ("Sony WH-1000XM5", "399.99", 20),
    ("Microsoft Surface Pro", "1199.99", 18),
    ("Apple Watch Series 9", "429.99", 35),
    ("Nintendo Switch OLED", "349.99", 45),
    ("LG 27\" 4K Monitor", "449.99", 12),
    ("Logitech MX Master 3", "99.99", 60),
    ("Mechanical Keyboard", "159.99", 25),
    ("Webcam HD 1080p", "79.99", 40),
    ("Bluetooth Speaker", "129.99", 55),
    ("Gaming Mouse", "89.99", 70),
    ("USB-C Hub", "49.99", 80),
    ("Wireless Charger", "39.99", 90),
    ("External SSD 1TB", "149.99", 35),
    ("Phone Case", "24.99", 200),
];

#[derive(Debug, Deserialize)]
struct BulkCreateResponse {
    customers: Vec<Customer>,
    errors: Vec<serde::de::IgnoredAny>,
}

/// Seed the server.
///
/// # Errors
///
/// Returns an error on network failures or unprocessable responses;
/// individual rejected rows (e.g. reruns hitting duplicate emails) are
/// logged and skipped.
pub async fn run(
    base_url: &str,
    customer_count: usize,
    product_count: usize,
    order_count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    info!(base_url, "Starting database seeding");

    let customers = seed_customers(&client, base_url, customer_count).await?;
    let products = seed_products(&client, base_url, product_count).await?;
    let orders = seed_orders(&client, base_url, &customers, &products, order_count).await?;

    info!("Seeding complete!");
    info!("  Customers created: {}", customers.len());
    info!("  Products created: {}", products.len());
    info!("  Orders created: {}", orders.len());
    Ok(())
}

async fn seed_customers(
    client: &reqwest::Client,
    base_url: &str,
    count: usize,
) -> Result<Vec<Customer>, Box<dyn std::error::Error>> {
    let mut rng = rand::rng();

    let mut inputs: Vec<CreateCustomerInput> = SAMPLE_CUSTOMERS
        .iter()
        .take(count)
        .map(|(name, email, phone)| CreateCustomerInput {
            name: (*name).to_owned(),
            email: (*email).to_owned(),
            phone: Some((*phone).to_owned()),
        })
        .collect();

    // Generate the remainder when more were requested than predefined.
    for i in SAMPLE_CUSTOMERS.len()..count {
        inputs.push(CreateCustomerInput {
            name: format!("Customer {}", i + 1),
            email: format!("customer{}@example.com", i + 1),
            phone: Some(format!("+1{}", rng.random_range(1_000_000_000u64..=9_999_999_999))),
        });
    }

    let response: BulkCreateResponse = client
        .post(format!("{base_url}/customers/bulk"))
        .json(&inputs)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if !response.errors.is_empty() {
        warn!(
            skipped = response.errors.len(),
            "some customers were rejected (already seeded?)"
        );
    }
    info!(count = response.customers.len(), "customers created");
    Ok(response.customers)
}

async fn seed_products(
    client: &reqwest::Client,
    base_url: &str,
    count: usize,
) -> Result<Vec<Product>, Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let mut products = Vec::new();

    for i in 0..count {
        let input = if let Some((name, price, stock)) = SAMPLE_PRODUCTS.get(i) {
            CreateProductInput {
                name: (*name).to_owned(),
                price: price.parse()?,
                stock: Some(*stock),
            }
        } else {
            CreateProductInput {
                name: format!("Product {}", i + 1),
                price: format!("{:.2}", rng.random_range(10.0..1000.0)).parse()?,
                stock: Some(rng.random_range(5..=100)),
            }
        };

        let product: Product = client
            .post(format!("{base_url}/products"))
            .json(&input)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        products.push(product);
    }

    info!(count = products.len(), "products created");
    Ok(products)
}

async fn seed_orders(
    client: &reqwest::Client,
    base_url: &str,
    customers: &[Customer],
    products: &[Product],
    count: usize,
) -> Result<Vec<Order>, Box<dyn std::error::Error>> {
    if customers.is_empty() || products.is_empty() {
        warn!("no customers or products available, skipping orders");
        return Ok(Vec::new());
    }

    let mut rng = rand::rng();
    let mut orders = Vec::new();

    for _ in 0..count {
        let customer = customers.choose(&mut rng).expect("non-empty customers");

        // 1-4 distinct products per order.
        let picks = rng.random_range(1..=4.min(products.len()));
        let product_ids: Vec<String> = products
            .choose_multiple(&mut rng, picks)
            .map(|p| p.id.to_string())
            .collect();

        // Place the order at a random point in the last 30 days.
        let days_ago = rng.random_range(0..=30);
        let input = CreateOrderInput {
            customer_id: customer.id.to_string(),
            product_ids,
            order_date: Some(Utc::now() - Duration::days(days_ago)),
        };

        let order: Order = client
            .post(format!("{base_url}/orders"))
            .json(&input)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        orders.push(order);
    }

    info!(count = orders.len(), "orders created");
    Ok(orders)
}
