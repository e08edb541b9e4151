use std::sync::Arc;

use futures::StreamExt;
use poem::Request;
use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::franchise::errors::FranchiseError;
use business::domain::franchise::model::Franchise;
use business::domain::franchise::use_cases::add_branch::{AddBranchParams, AddBranchUseCase};
use business::domain::franchise::use_cases::add_product::{AddProductParams, AddProductUseCase};
use business::domain::franchise::use_cases::create::{
    CreateFranchiseParams, CreateFranchiseUseCase,
};
use business::domain::franchise::use_cases::find_max_stock::{
    FindMaxStockParams, FindMaxStockUseCase,
};
use business::domain::franchise::use_cases::get_by_id::{
    GetFranchiseByIdParams, GetFranchiseByIdUseCase,
};
use business::domain::franchise::use_cases::remove_product::{
    RemoveProductParams, RemoveProductUseCase,
};
use business::domain::franchise::use_cases::update_branch_name::{
    UpdateBranchNameParams, UpdateBranchNameUseCase,
};
use business::domain::franchise::use_cases::update_name::{
    UpdateFranchiseNameParams, UpdateFranchiseNameUseCase,
};
use business::domain::franchise::use_cases::update_product_name::{
    UpdateProductNameParams, UpdateProductNameUseCase,
};
use business::domain::franchise::use_cases::update_stock::{
    UpdateStockParams, UpdateStockUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::franchise::dto::{
    AddBranchRequest, AddProductRequest, BranchProductResponse, CreateFranchiseRequest,
    FranchiseResponse, UpdateNameRequest, UpdateStockRequest,
};
use crate::api::tags::ApiTags;

pub struct FranchiseApi {
    create_use_case: Arc<dyn CreateFranchiseUseCase>,
    get_by_id_use_case: Arc<dyn GetFranchiseByIdUseCase>,
    add_branch_use_case: Arc<dyn AddBranchUseCase>,
    add_product_use_case: Arc<dyn AddProductUseCase>,
    remove_product_use_case: Arc<dyn RemoveProductUseCase>,
    update_stock_use_case: Arc<dyn UpdateStockUseCase>,
    find_max_stock_use_case: Arc<dyn FindMaxStockUseCase>,
    update_name_use_case: Arc<dyn UpdateFranchiseNameUseCase>,
    update_branch_name_use_case: Arc<dyn UpdateBranchNameUseCase>,
    update_product_name_use_case: Arc<dyn UpdateProductNameUseCase>,
}

impl FranchiseApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_use_case: Arc<dyn CreateFranchiseUseCase>,
        get_by_id_use_case: Arc<dyn GetFranchiseByIdUseCase>,
        add_branch_use_case: Arc<dyn AddBranchUseCase>,
        add_product_use_case: Arc<dyn AddProductUseCase>,
        remove_product_use_case: Arc<dyn RemoveProductUseCase>,
        update_stock_use_case: Arc<dyn UpdateStockUseCase>,
        find_max_stock_use_case: Arc<dyn FindMaxStockUseCase>,
        update_name_use_case: Arc<dyn UpdateFranchiseNameUseCase>,
        update_branch_name_use_case: Arc<dyn UpdateBranchNameUseCase>,
        update_product_name_use_case: Arc<dyn UpdateProductNameUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_by_id_use_case,
            add_branch_use_case,
            add_product_use_case,
            remove_product_use_case,
            update_stock_use_case,
            find_max_stock_use_case,
            update_name_use_case,
            update_branch_name_use_case,
            update_product_name_use_case,
        }
    }
}

/// Franchise management API
///
/// Franchises own branches, branches own products. Branches and products are addressed by id.
#[OpenApi(prefix_path = "/api")]
impl FranchiseApi {
    /// Create a franchise
    ///
    /// The name must be unique across all franchises.
    #[oai(path = "/franchises", method = "post", tag = "ApiTags::Franchises")]
    async fn create_franchise(
        &self,
        req: &Request,
        body: Json<CreateFranchiseRequest>,
    ) -> CreateFranchiseResponse {
        let params = CreateFranchiseParams { name: body.0.name };

        match self.create_use_case.execute(params).await {
            Ok(franchise) => CreateFranchiseResponse::Created(Json(franchise.into())),
            Err(err) => {
                let (status, json) = err.into_error_response(req.uri().path());
                match status.as_u16() {
                    400 => CreateFranchiseResponse::BadRequest(json),
                    409 => CreateFranchiseResponse::Conflict(json),
                    _ => CreateFranchiseResponse::InternalError(json),
                }
            }
        }
    }

    /// Get a franchise by ID
    #[oai(path = "/franchises/:franchise_id", method = "get", tag = "ApiTags::Franchises")]
    async fn get_franchise(&self, req: &Request, franchise_id: Path<String>) -> FranchiseApiResponse {
        let params = GetFranchiseByIdParams { id: franchise_id.0 };

        FranchiseApiResponse::from_result(
            self.get_by_id_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Rename a franchise
    #[oai(path = "/franchises/:franchise_id", method = "patch", tag = "ApiTags::Franchises")]
    async fn update_franchise_name(
        &self,
        req: &Request,
        franchise_id: Path<String>,
        body: Json<UpdateNameRequest>,
    ) -> FranchiseApiResponse {
        let params = UpdateFranchiseNameParams {
            franchise_id: franchise_id.0,
            new_name: body.0.name,
        };

        FranchiseApiResponse::from_result(
            self.update_name_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Add a branch to a franchise
    ///
    /// Branch names are unique within a franchise, ignoring case.
    #[oai(
        path = "/franchises/:franchise_id/branches",
        method = "post",
        tag = "ApiTags::Franchises"
    )]
    async fn add_branch(
        &self,
        req: &Request,
        franchise_id: Path<String>,
        body: Json<AddBranchRequest>,
    ) -> FranchiseApiResponse {
        let params = AddBranchParams {
            franchise_id: franchise_id.0,
            name: body.0.name,
        };

        FranchiseApiResponse::from_result(
            self.add_branch_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Rename a branch
    #[oai(
        path = "/franchises/:franchise_id/branches/:branch_id",
        method = "patch",
        tag = "ApiTags::Franchises"
    )]
    async fn update_branch_name(
        &self,
        req: &Request,
        franchise_id: Path<String>,
        branch_id: Path<String>,
        body: Json<UpdateNameRequest>,
    ) -> FranchiseApiResponse {
        let params = UpdateBranchNameParams {
            franchise_id: franchise_id.0,
            branch_id: branch_id.0,
            new_name: body.0.name,
        };

        FranchiseApiResponse::from_result(
            self.update_branch_name_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Add a product to a branch
    ///
    /// Stock defaults to zero and must not be negative.
    #[oai(
        path = "/franchises/:franchise_id/branches/:branch_id/products",
        method = "post",
        tag = "ApiTags::Franchises"
    )]
    async fn add_product(
        &self,
        req: &Request,
        franchise_id: Path<String>,
        branch_id: Path<String>,
        body: Json<AddProductRequest>,
    ) -> FranchiseApiResponse {
        let params = AddProductParams {
            franchise_id: franchise_id.0,
            branch_id: branch_id.0,
            product_id: body.0.product_id,
            name: body.0.name,
            stock: body.0.stock,
        };

        FranchiseApiResponse::from_result(
            self.add_product_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Remove a product from a branch
    #[oai(
        path = "/franchises/:franchise_id/branches/:branch_id/products/:product_id",
        method = "delete",
        tag = "ApiTags::Franchises"
    )]
    async fn remove_product(
        &self,
        req: &Request,
        franchise_id: Path<String>,
        branch_id: Path<String>,
        product_id: Path<String>,
    ) -> FranchiseApiResponse {
        let params = RemoveProductParams {
            franchise_id: franchise_id.0,
            branch_id: branch_id.0,
            product_id: product_id.0,
        };

        FranchiseApiResponse::from_result(
            self.remove_product_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Set the stock of a product
    #[oai(
        path = "/franchises/:franchise_id/branches/:branch_id/products/:product_id",
        method = "patch",
        tag = "ApiTags::Franchises"
    )]
    async fn update_stock(
        &self,
        req: &Request,
        franchise_id: Path<String>,
        branch_id: Path<String>,
        product_id: Path<String>,
        body: Json<UpdateStockRequest>,
    ) -> FranchiseApiResponse {
        let params = UpdateStockParams {
            franchise_id: franchise_id.0,
            branch_id: branch_id.0,
            product_id: product_id.0,
            stock: body.0.stock,
        };

        FranchiseApiResponse::from_result(
            self.update_stock_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Rename a product
    #[oai(
        path = "/franchises/:franchise_id/branches/:branch_id/products/:product_id/rename",
        method = "patch",
        tag = "ApiTags::Franchises"
    )]
    async fn update_product_name(
        &self,
        req: &Request,
        franchise_id: Path<String>,
        branch_id: Path<String>,
        product_id: Path<String>,
        body: Json<UpdateNameRequest>,
    ) -> FranchiseApiResponse {
        let params = UpdateProductNameParams {
            franchise_id: franchise_id.0,
            branch_id: branch_id.0,
            product_id: product_id.0,
            new_name: body.0.name,
        };

        FranchiseApiResponse::from_result(
            self.update_product_name_use_case.execute(params).await,
            req.uri().path(),
        )
    }

    /// Highest-stock product per branch
    ///
    /// One entry per branch holding products, in branch order. Responds 404 when there is
    /// nothing to report.
    #[oai(
        path = "/franchises/:franchise_id/products/max-stock",
        method = "get",
        tag = "ApiTags::Franchises"
    )]
    async fn find_max_stock(&self, req: &Request, franchise_id: Path<String>) -> MaxStockResponse {
        let path = req.uri().path();
        let franchise_id = franchise_id.0;
        let params = FindMaxStockParams {
            franchise_id: franchise_id.clone(),
        };

        let stream = match self.find_max_stock_use_case.execute(params).await {
            Ok(stream) => stream,
            Err(err) => return MaxStockResponse::from_error(err, path),
        };
        let results: Vec<BranchProductResponse> = stream.map(BranchProductResponse::from).collect().await;

        if results.is_empty() {
            return MaxStockResponse::NotFound(Json(ErrorResponse::new(
                "RESOURCE_NOT_FOUND",
                format!("no products found for franchise {franchise_id}"),
                path,
            )));
        }
        MaxStockResponse::Ok(Json(results))
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateFranchiseResponse {
    #[oai(status = 201)]
    Created(Json<FranchiseResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

/// Response of every operation that returns the franchise document.
#[derive(poem_openapi::ApiResponse)]
pub enum FranchiseApiResponse {
    #[oai(status = 200)]
    Ok(Json<FranchiseResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl FranchiseApiResponse {
    fn from_result(
        result: Result<Franchise, FranchiseError>,
        path: &str,
    ) -> Self {
        match result {
            Ok(franchise) => Self::Ok(Json(franchise.into())),
            Err(err) => {
                let (status, json) = err.into_error_response(path);
                match status.as_u16() {
                    400 => Self::BadRequest(json),
                    404 => Self::NotFound(json),
                    409 => Self::Conflict(json),
                    _ => Self::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum MaxStockResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<BranchProductResponse>>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl MaxStockResponse {
    fn from_error(err: FranchiseError, path: &str) -> Self {
        let (status, json) = err.into_error_response(path);
        match status.as_u16() {
            404 => Self::NotFound(json),
            _ => Self::InternalError(json),
        }
    }
}
