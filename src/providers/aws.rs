//! Import identifier rules for the `hashicorp/aws` provider.
//!
//! Shapes follow the "Import" section of each resource's documentation page.
//! Types whose identifier is not derivable from state alone (for example
//! `aws_security_group_rule`) are left out on purpose and reported as unsupported.

use super::Condition::{Absent, All, Always, Equals, Present};
use super::Part::{Attr, List, Lit, Tail};
use super::{FormatRule, Template, rule};

/// `bucket` or `bucket,expected_bucket_owner`, shared by the S3 bucket configuration resources.
macro_rules! bucket_config_rule {
    ($resource_type:literal) => {
        FormatRule {
            resource_type: $resource_type,
            templates: &[
                Template {
                    when: Present("expected_bucket_owner"),
                    parts: &[Attr("bucket"), Lit(","), Attr("expected_bucket_owner")],
                },
                Template {
                    when: Always,
                    parts: &[Attr("bucket")],
                },
            ],
        }
    };
}

pub static RULES: &[FormatRule] = &[
    // S3
    rule!("aws_s3_bucket" => Attr("bucket")),
    rule!("aws_s3_bucket_policy" => Attr("bucket")),
    rule!("aws_s3_bucket_public_access_block" => Attr("bucket")),
    rule!("aws_s3_bucket_ownership_controls" => Attr("bucket")),
    rule!("aws_s3_bucket_notification" => Attr("bucket")),
    rule!("aws_s3_bucket_cors_configuration" => Attr("bucket")),
    rule!("aws_s3_object" => Attr("bucket"), Lit("/"), Attr("key")),
    bucket_config_rule!("aws_s3_bucket_versioning"),
    bucket_config_rule!("aws_s3_bucket_server_side_encryption_configuration"),
    bucket_config_rule!("aws_s3_bucket_lifecycle_configuration"),
    bucket_config_rule!("aws_s3_bucket_logging"),
    bucket_config_rule!("aws_s3_bucket_website_configuration"),
    FormatRule {
        resource_type: "aws_s3_bucket_acl",
        templates: &[
            Template {
                when: All(&[Present("expected_bucket_owner"), Present("acl")]),
                parts: &[
                    Attr("bucket"),
                    Lit(","),
                    Attr("expected_bucket_owner"),
                    Lit(","),
                    Attr("acl"),
                ],
            },
            Template {
                when: Present("expected_bucket_owner"),
                parts: &[Attr("bucket"), Lit(","), Attr("expected_bucket_owner")],
            },
            Template {
                when: Present("acl"),
                parts: &[Attr("bucket"), Lit(","), Attr("acl")],
            },
            Template {
                when: Always,
                parts: &[Attr("bucket")],
            },
        ],
    },
    // IAM
    rule!("aws_iam_user" => Attr("name")),
    rule!("aws_iam_group" => Attr("name")),
    rule!("aws_iam_policy" => Attr("arn")),
    rule!("aws_iam_instance_profile" => Attr("name")),
    rule!("aws_iam_openid_connect_provider" => Attr("arn")),
    rule!("aws_iam_service_linked_role" => Attr("arn")),
    rule!("aws_iam_role_policy" => Attr("role"), Lit(":"), Attr("name")),
    rule!("aws_iam_user_policy" => Attr("user"), Lit(":"), Attr("name")),
    rule!("aws_iam_role_policy_attachment" => Attr("role"), Lit("/"), Attr("policy_arn")),
    rule!("aws_iam_user_policy_attachment" => Attr("user"), Lit("/"), Attr("policy_arn")),
    rule!("aws_iam_group_policy_attachment" => Attr("group"), Lit("/"), Attr("policy_arn")),
    rule!("aws_iam_user_group_membership" => Attr("user"), Lit("/"), List("groups", "/")),
    rule!("aws_iam_access_key" => Attr("id")),
    // Lambda
    rule!("aws_lambda_function" => Attr("function_name")),
    rule!("aws_lambda_alias" => Attr("function_name"), Lit("/"), Attr("name")),
    rule!("aws_lambda_event_source_mapping" => Attr("uuid")),
    rule!("aws_lambda_layer_version" => Attr("arn")),
    FormatRule {
        resource_type: "aws_lambda_permission",
        templates: &[
            Template {
                when: Present("qualifier"),
                parts: &[
                    Attr("function_name"),
                    Lit(":"),
                    Attr("qualifier"),
                    Lit("/"),
                    Attr("statement_id"),
                ],
            },
            Template {
                when: Always,
                parts: &[Attr("function_name"), Lit("/"), Attr("statement_id")],
            },
        ],
    },
    FormatRule {
        resource_type: "aws_lambda_function_url",
        templates: &[
            Template {
                when: Present("qualifier"),
                parts: &[Attr("function_name"), Lit("/"), Attr("qualifier")],
            },
            Template {
                when: Always,
                parts: &[Attr("function_name")],
            },
        ],
    },
    // CloudWatch and EventBridge
    rule!("aws_cloudwatch_log_group" => Attr("name")),
    rule!("aws_cloudwatch_log_stream" => Attr("log_group_name"), Lit(":"), Attr("name")),
    rule!("aws_cloudwatch_log_metric_filter" => Attr("log_group_name"), Lit(":"), Attr("name")),
    rule!("aws_cloudwatch_log_subscription_filter" => Attr("log_group_name"), Lit("|"), Attr("name")),
    rule!("aws_cloudwatch_metric_alarm" => Attr("alarm_name")),
    rule!("aws_cloudwatch_dashboard" => Attr("dashboard_name")),
    rule!("aws_cloudwatch_event_bus" => Attr("name")),
    FormatRule {
        resource_type: "aws_cloudwatch_event_rule",
        templates: &[
            Template {
                when: Equals("event_bus_name", "default"),
                parts: &[Attr("name")],
            },
            Template {
                when: Present("event_bus_name"),
                parts: &[Attr("event_bus_name"), Lit("/"), Attr("name")],
            },
            Template {
                when: Absent("event_bus_name"),
                parts: &[Attr("name")],
            },
        ],
    },
    FormatRule {
        resource_type: "aws_cloudwatch_event_target",
        templates: &[
            Template {
                when: Equals("event_bus_name", "default"),
                parts: &[Attr("rule"), Lit("/"), Attr("target_id")],
            },
            Template {
                when: Present("event_bus_name"),
                parts: &[
                    Attr("event_bus_name"),
                    Lit("/"),
                    Attr("rule"),
                    Lit("/"),
                    Attr("target_id"),
                ],
            },
            Template {
                when: Absent("event_bus_name"),
                parts: &[Attr("rule"), Lit("/"), Attr("target_id")],
            },
        ],
    },
    // Messaging and data stores
    rule!("aws_sqs_queue" => Attr("url")),
    rule!("aws_sqs_queue_policy" => Attr("queue_url")),
    rule!("aws_sns_topic" => Attr("arn")),
    rule!("aws_sns_topic_policy" => Attr("arn")),
    rule!("aws_sns_topic_subscription" => Attr("arn")),
    rule!("aws_dynamodb_table" => Attr("name")),
    rule!("aws_kinesis_stream" => Attr("name")),
    rule!("aws_kinesis_firehose_delivery_stream" => Attr("arn")),
    rule!("aws_sfn_state_machine" => Attr("arn")),
    // Networking
    rule!("aws_vpc" => Attr("id")),
    rule!("aws_subnet" => Attr("id")),
    rule!("aws_security_group" => Attr("id")),
    rule!("aws_vpc_security_group_ingress_rule" => Attr("security_group_rule_id")),
    rule!("aws_vpc_security_group_egress_rule" => Attr("security_group_rule_id")),
    rule!("aws_internet_gateway" => Attr("id")),
    rule!("aws_nat_gateway" => Attr("id")),
    rule!("aws_eip" => Attr("allocation_id")),
    rule!("aws_route_table" => Attr("id")),
    rule!("aws_network_acl" => Attr("id")),
    rule!("aws_vpc_endpoint" => Attr("id")),
    rule!("aws_vpc_peering_connection" => Attr("id")),
    rule!("aws_flow_log" => Attr("id")),
    FormatRule {
        resource_type: "aws_route_table_association",
        templates: &[
            Template {
                when: Present("subnet_id"),
                parts: &[Attr("subnet_id"), Lit("/"), Attr("route_table_id")],
            },
            Template {
                when: Present("gateway_id"),
                parts: &[Attr("gateway_id"), Lit("/"), Attr("route_table_id")],
            },
        ],
    },
    FormatRule {
        resource_type: "aws_route",
        templates: &[
            Template {
                when: Present("destination_cidr_block"),
                parts: &[Attr("route_table_id"), Lit("_"), Attr("destination_cidr_block")],
            },
            Template {
                when: Present("destination_ipv6_cidr_block"),
                parts: &[
                    Attr("route_table_id"),
                    Lit("_"),
                    Attr("destination_ipv6_cidr_block"),
                ],
            },
            Template {
                when: Present("destination_prefix_list_id"),
                parts: &[
                    Attr("route_table_id"),
                    Lit("_"),
                    Attr("destination_prefix_list_id"),
                ],
            },
        ],
    },
    // DNS, certificates and CDN
    rule!("aws_route53_zone" => Attr("zone_id")),
    FormatRule {
        resource_type: "aws_route53_record",
        templates: &[
            Template {
                when: Present("set_identifier"),
                parts: &[
                    Attr("zone_id"),
                    Lit("_"),
                    Attr("name"),
                    Lit("_"),
                    Attr("type"),
                    Lit("_"),
                    Attr("set_identifier"),
                ],
            },
            Template {
                when: Always,
                parts: &[
                    Attr("zone_id"),
                    Lit("_"),
                    Attr("name"),
                    Lit("_"),
                    Attr("type"),
                ],
            },
        ],
    },
    rule!("aws_acm_certificate" => Attr("arn")),
    rule!("aws_cloudfront_distribution" => Attr("id")),
    rule!("aws_cloudfront_origin_access_identity" => Attr("id")),
    rule!("aws_cloudfront_origin_access_control" => Attr("id")),
    rule!("aws_wafv2_web_acl" => Attr("id"), Lit("/"), Attr("name"), Lit("/"), Attr("scope")),
    // Compute and containers
    rule!("aws_instance" => Attr("id")),
    rule!("aws_key_pair" => Attr("key_name")),
    rule!("aws_launch_template" => Attr("id")),
    rule!("aws_autoscaling_group" => Attr("name")),
    rule!("aws_ebs_volume" => Attr("id")),
    rule!("aws_volume_attachment" => Attr("device_name"), Lit(":"), Attr("volume_id"), Lit(":"), Attr("instance_id")),
    rule!("aws_ecr_repository" => Attr("name")),
    rule!("aws_ecr_lifecycle_policy" => Attr("repository")),
    rule!("aws_ecr_repository_policy" => Attr("repository")),
    rule!("aws_ecs_cluster" => Attr("name")),
    rule!("aws_ecs_service" => Tail("cluster", '/'), Lit("/"), Attr("name")),
    rule!("aws_ecs_task_definition" => Attr("arn")),
    rule!("aws_eks_cluster" => Attr("name")),
    rule!("aws_eks_node_group" => Attr("cluster_name"), Lit(":"), Attr("node_group_name")),
    rule!("aws_eks_addon" => Attr("cluster_name"), Lit(":"), Attr("addon_name")),
    rule!("aws_lb" => Attr("arn")),
    rule!("aws_alb" => Attr("arn")),
    rule!("aws_lb_target_group" => Attr("arn")),
    rule!("aws_lb_listener" => Attr("arn")),
    rule!("aws_lb_listener_rule" => Attr("arn")),
    rule!("aws_appautoscaling_target" => Attr("service_namespace"), Lit("/"), Attr("resource_id"), Lit("/"), Attr("scalable_dimension")),
    rule!("aws_appautoscaling_policy" => Attr("service_namespace"), Lit("/"), Attr("resource_id"), Lit("/"), Attr("scalable_dimension"), Lit("/"), Attr("name")),
    // Databases and storage
    rule!("aws_db_instance" => Attr("identifier")),
    rule!("aws_db_subnet_group" => Attr("name")),
    rule!("aws_db_parameter_group" => Attr("name")),
    rule!("aws_rds_cluster" => Attr("cluster_identifier")),
    rule!("aws_rds_cluster_instance" => Attr("identifier")),
    rule!("aws_elasticache_cluster" => Attr("cluster_id")),
    rule!("aws_elasticache_replication_group" => Attr("replication_group_id")),
    rule!("aws_elasticache_subnet_group" => Attr("name")),
    rule!("aws_efs_file_system" => Attr("id")),
    rule!("aws_efs_mount_target" => Attr("id")),
    rule!("aws_glue_catalog_database" => Attr("catalog_id"), Lit(":"), Attr("name")),
    rule!("aws_athena_workgroup" => Attr("name")),
    // Security and configuration
    rule!("aws_kms_key" => Attr("key_id")),
    rule!("aws_kms_alias" => Attr("name")),
    rule!("aws_secretsmanager_secret" => Attr("arn")),
    rule!("aws_secretsmanager_secret_version" => Attr("secret_id"), Lit("|"), Attr("version_id")),
    rule!("aws_ssm_parameter" => Attr("name")),
    rule!("aws_ssm_document" => Attr("name")),
    rule!("aws_cloudtrail" => Attr("arn")),
    rule!("aws_cognito_user_pool" => Attr("id")),
    rule!("aws_cognito_user_pool_client" => Attr("user_pool_id"), Lit("/"), Attr("id")),
    rule!("aws_cognito_user_group" => Attr("user_pool_id"), Lit("/"), Attr("name")),
    // API and developer tooling
    rule!("aws_api_gateway_rest_api" => Attr("id")),
    rule!("aws_apigatewayv2_api" => Attr("id")),
    rule!("aws_codebuild_project" => Attr("name")),
    rule!("aws_ses_domain_identity" => Attr("domain")),
];
