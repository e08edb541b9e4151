pub mod application {
    pub mod franchise {
        pub mod add_branch;
        pub mod add_product;
        pub mod create;
        pub mod find_max_stock;
        pub mod get_by_id;
        pub mod remove_product;
        pub mod update_branch_name;
        pub mod update_name;
        pub mod update_product_name;
        pub mod update_stock;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod franchise {
        pub mod errors;
        pub mod gateway;
        pub mod model;
        pub mod use_cases {
            pub mod add_branch;
            pub mod add_product;
            pub mod create;
            pub mod find_max_stock;
            pub mod get_by_id;
            pub mod remove_product;
            pub mod update_branch_name;
            pub mod update_name;
            pub mod update_product_name;
            pub mod update_stock;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
