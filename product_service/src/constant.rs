pub const SERVICE_NAME: &str = "product-service";
pub const DEFAULT_CATEGORY: &str = "General";

// 64 KiB covers any product payload
pub const MAX_REQUEST_SIZE: usize = 64 * 1024;

pub const MSG_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const MSG_NOT_FOUND: &str = "Not found";
pub const MSG_BAD_REQUEST: &str = "Bad request";
pub const MSG_QUERY_REQUIRED: &str = "Query parameter is required";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error";
pub const MSG_CREATED: &str = "Product created successfully";
pub const MSG_UPDATED: &str = "Product updated successfully";
pub const MSG_DELETED: &str = "Product deleted successfully";

pub const CORS_HEADERS: &str = "Access-Control-Allow-Origin: *\r\n\
Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS\r\n\
Access-Control-Allow-Headers: Content-Type, Authorization\r\n";

pub const LOGGING_INCOMING_REQUEST: &str = "Incoming Request handling by: ";
