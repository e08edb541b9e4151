use poem_openapi::Object;

use business::domain::franchise::model::{Branch, BranchProductResult, Franchise, Product};

#[derive(Debug, Clone, Object)]
pub struct CreateFranchiseRequest {
    /// Franchise name, unique across the system
    pub name: Option<String>,
}

#[derive(Debug, Clone, Object)]
pub struct AddBranchRequest {
    /// Branch name, unique within the franchise ignoring case
    pub name: Option<String>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct AddProductRequest {
    /// Generated when omitted
    pub product_id: Option<String>,
    pub name: Option<String>,
    /// Initial stock, zero when omitted
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateStockRequest {
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateNameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: String,
    pub name: String,
    pub stock: i32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name,
            stock: product.stock,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct BranchResponse {
    pub branch_id: String,
    pub name: String,
    pub products: Vec<ProductResponse>,
}

impl From<Branch> for BranchResponse {
    fn from(branch: Branch) -> Self {
        Self {
            branch_id: branch.branch_id,
            name: branch.name,
            products: branch.products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct FranchiseResponse {
    pub id: String,
    pub name: String,
    pub branches: Vec<BranchResponse>,
}

impl From<Franchise> for FranchiseResponse {
    fn from(franchise: Franchise) -> Self {
        Self {
            id: franchise.id,
            name: franchise.name,
            branches: franchise.branches.into_iter().map(Into::into).collect(),
        }
    }
}

/// Highest-stock product of one branch
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct BranchProductResponse {
    pub branch_name: String,
    pub product: Option<ProductResponse>,
}

impl From<BranchProductResult> for BranchProductResponse {
    fn from(result: BranchProductResult) -> Self {
        Self {
            branch_name: result.branch_name,
            product: result.product.map(Into::into),
        }
    }
}
