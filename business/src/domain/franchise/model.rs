use serde::{Deserialize, Serialize};

use super::errors::FranchiseError;
use crate::domain::shared::value_objects::{generate_id, non_blank};

/// Top-level aggregate. The name is unique across all franchises (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franchise {
    pub id: String,
    pub name: String,
    pub branches: Vec<Branch>,
}

/// A location under a franchise. The name is unique within its franchise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub branch_id: String,
    pub name: String,
    pub products: Vec<Product>,
}

/// An inventory item. The name is unique within its branch and `stock` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub stock: i32,
}

/// Read-only projection: the product holding the most stock in one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchProductResult {
    pub branch_name: String,
    pub product: Option<Product>,
}

impl Franchise {
    /// Builds a franchise that has not been persisted yet; the store assigns its id.
    pub fn new(name: Option<&str>) -> Result<Self, FranchiseError> {
        let name = non_blank(name).ok_or(FranchiseError::FranchiseNameEmpty)?;

        Ok(Self {
            id: String::new(),
            name: name.to_string(),
            branches: Vec::new(),
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(id: String, name: String, branches: Vec<Branch>) -> Self {
        Self { id, name, branches }
    }

    pub fn has_branch_named(&self, name: &str) -> bool {
        self.branches
            .iter()
            .any(|b| b.name.to_lowercase() == name.to_lowercase())
    }

    pub fn branch(&self, branch_id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.branch_id == branch_id)
    }

    /// One result per branch that holds at least one product, in branch order.
    pub fn max_stock_per_branch(&self) -> Vec<BranchProductResult> {
        self.branches
            .iter()
            .filter_map(|branch| {
                branch.max_stock_product().map(|product| BranchProductResult {
                    branch_name: branch.name.clone(),
                    product: Some(product.clone()),
                })
            })
            .collect()
    }
}

impl Branch {
    pub fn new(name: Option<&str>) -> Result<Self, FranchiseError> {
        let name = non_blank(name).ok_or(FranchiseError::BranchNameEmpty)?;

        Ok(Self {
            branch_id: generate_id(),
            name: name.to_string(),
            products: Vec::new(),
        })
    }

    pub fn from_repository(branch_id: String, name: String, products: Vec<Product>) -> Self {
        Self {
            branch_id,
            name,
            products,
        }
    }

    pub fn has_product_named(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.name == name)
    }

    /// Highest stock wins; on a tie the product inserted first is kept.
    pub fn max_stock_product(&self) -> Option<&Product> {
        self.products
            .iter()
            .reduce(|best, p| if p.stock > best.stock { p } else { best })
    }
}

impl Product {
    /// Keeps a caller-supplied id when it is non-empty, otherwise generates one.
    pub fn new(
        product_id: Option<String>,
        name: Option<&str>,
        stock: Option<i32>,
    ) -> Result<Self, FranchiseError> {
        let stock = stock.unwrap_or(0);
        if stock < 0 {
            return Err(FranchiseError::NegativeStock);
        }
        let name = non_blank(name).ok_or(FranchiseError::ProductNameEmpty)?;
        let product_id = product_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_id);

        Ok(Self {
            product_id,
            name: name.to_string(),
            stock,
        })
    }

    pub fn from_repository(product_id: String, name: String, stock: i32) -> Self {
        Self {
            product_id,
            name,
            stock,
        }
    }
}
