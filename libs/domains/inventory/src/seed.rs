//! Demo catalog used on first run, after corruption, and by reset

use chrono::Utc;

use crate::models::{Product, ProductDraft};

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    sku: &'static str,
    category: &'static str,
    current_stock: i64,
    minimum_stock_level: i64,
    restock_threshold: i64,
    unit_price: f64,
    supplier_info: &'static str,
    location: &'static str,
    image: &'static str,
}

const SEED: [SeedProduct; 5] = [
    SeedProduct {
        id: "1",
        name: "Wireless Headphones",
        description: "Premium noise-cancelling wireless headphones with 30-hour battery life",
        sku: "WH-1000XM4",
        category: "Electronics",
        current_stock: 24,
        minimum_stock_level: 10,
        restock_threshold: 12,
        unit_price: 349.99,
        supplier_info: "Sony Electronics",
        location: "Warehouse A - Shelf 5B",
        image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&q=80",
    },
    SeedProduct {
        id: "2",
        name: "Smart Watch Series 7",
        description: "Advanced smartwatch with health monitoring and GPS",
        sku: "SWS7-42MM",
        category: "Wearables",
        current_stock: 8,
        minimum_stock_level: 15,
        restock_threshold: 10,
        unit_price: 399.99,
        supplier_info: "Apple Inc.",
        location: "Warehouse B - Shelf 2C",
        image: "https://images.unsplash.com/photo-1546868871-7041f2a55e12?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&q=80",
    },
    SeedProduct {
        id: "3",
        name: "4K Ultra HD TV 55\"",
        description: "Smart TV with voice control and 4K resolution",
        sku: "TV-55OLED",
        category: "Electronics",
        current_stock: 0,
        minimum_stock_level: 5,
        restock_threshold: 3,
        unit_price: 1299.99,
        supplier_info: "LG Electronics",
        location: "Warehouse A - Section 12",
        image: "https://images.unsplash.com/photo-1593359677879-a4bb92f829d1?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&q=80",
    },
    SeedProduct {
        id: "4",
        name: "Gaming Laptop Pro",
        description: "High-performance gaming laptop with RGB keyboard",
        sku: "GL-RTX3070",
        category: "Computers",
        current_stock: 12,
        minimum_stock_level: 8,
        restock_threshold: 5,
        unit_price: 1799.99,
        supplier_info: "MSI Technology",
        location: "Warehouse C - Shelf 1A",
        image: "https://images.unsplash.com/photo-1603302576837-37561b2e2302?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&q=80",
    },
    SeedProduct {
        id: "5",
        name: "Ergonomic Office Chair",
        description: "Adjustable office chair with lumbar support",
        sku: "EOC-PRO2",
        category: "Furniture",
        current_stock: 3,
        minimum_stock_level: 10,
        restock_threshold: 5,
        unit_price: 299.99,
        supplier_info: "Herman Miller",
        location: "Warehouse B - Section 4",
        image: "https://images.unsplash.com/photo-1505797149-85db3bc58b21?ixlib=rb-4.0.3&auto=format&fit=crop&w=300&q=80",
    },
];

/// Build the five demo products, stamped with the current time
pub fn seed_products() -> Vec<Product> {
    let now = Utc::now();
    SEED.iter()
        .map(|seed| {
            let draft = ProductDraft {
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                sku: seed.sku.to_string(),
                category: seed.category.to_string(),
                current_stock: seed.current_stock,
                minimum_stock_level: seed.minimum_stock_level,
                restock_threshold: seed.restock_threshold,
                unit_price: seed.unit_price,
                supplier_info: seed.supplier_info.to_string(),
                location: seed.location.to_string(),
                image: seed.image.to_string(),
            };
            Product::with_id(seed.id.to_string(), draft, now)
        })
        .collect()
}
