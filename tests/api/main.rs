mod health_check;
mod helper;
