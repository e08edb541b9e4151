use std::collections::HashMap;

use sqlx::FromRow;

use business::domain::franchise::model::{Branch, BranchProductResult, Franchise, Product};

#[derive(Debug, FromRow)]
pub struct FranchiseEntity {
    pub id: String,
    pub name: String,
}

#[derive(Debug, FromRow)]
pub struct BranchEntity {
    pub id: String,
    pub name: String,
}

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, FromRow)]
pub struct MaxStockEntity {
    pub branch_name: String,
    pub product_id: String,
    pub product_name: String,
    pub stock: i32,
}

impl FranchiseEntity {
    /// Rebuilds the aggregate. `branches` and `products` must already be in position order.
    pub fn into_domain(self, branches: Vec<BranchEntity>, products: Vec<ProductEntity>) -> Franchise {
        let mut by_branch: HashMap<String, Vec<Product>> = HashMap::new();
        for product in products {
            by_branch
                .entry(product.branch_id)
                .or_default()
                .push(Product::from_repository(product.id, product.name, product.stock));
        }

        let branches = branches
            .into_iter()
            .map(|branch| {
                let products = by_branch.remove(&branch.id).unwrap_or_default();
                Branch::from_repository(branch.id, branch.name, products)
            })
            .collect();

        Franchise::from_repository(self.id, self.name, branches)
    }
}

impl MaxStockEntity {
    pub fn into_domain(self) -> BranchProductResult {
        BranchProductResult {
            branch_name: self.branch_name,
            product: Some(Product::from_repository(
                self.product_id,
                self.product_name,
                self.stock,
            )),
        }
    }
}
