//! Response Simulator
//!
//! Network-free interviewer. Classifies the job title into a category by
//! keyword, then picks a template for the current phase. Used when the
//! remote endpoint is disabled or fails.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::phase::InterviewPhase;

/// Reply used when a pool is somehow empty
pub const GENERIC_REPLY: &str = "感谢你的回答。让我们继续下一个问题。";

/// Job family inferred from the title
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Engineering,
    Design,
    Product,
    Operations,
    Sales,
    Management,
    HumanResources,
    Finance,
    Data,
    General,
}

impl JobCategory {
    /// Match order; the first category with a hit wins.
    const MATCH_ORDER: [JobCategory; 9] = [
        JobCategory::Engineering,
        JobCategory::Design,
        JobCategory::Product,
        JobCategory::Operations,
        JobCategory::Sales,
        JobCategory::Management,
        JobCategory::HumanResources,
        JobCategory::Finance,
        JobCategory::Data,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "engineering",
            Self::Design => "design",
            Self::Product => "product",
            Self::Operations => "operations",
            Self::Sales => "sales",
            Self::Management => "management",
            Self::HumanResources => "hr",
            Self::Finance => "finance",
            Self::Data => "data",
            Self::General => "general",
        }
    }

    /// Lowercase keywords matched as substrings of the lowercased title
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Engineering => &[
                "工程师", "engineer", "开发", "developer", "程序员", "programmer", "ai", "算法",
                "前端", "frontend", "后端", "backend", "全栈", "fullstack", "移动端", "mobile",
                "ios", "android", "测试", "qa", "devops", "运维", "架构师", "architect",
            ],
            Self::Design => &[
                "设计师", "designer", "ui", "ux", "视觉", "visual", "交互", "interaction",
                "用户体验", "平面", "graphic", "产品设计", "界面设计",
            ],
            Self::Product => &["产品", "product", "pm", "产品经理", "产品运营", "需求", "策划"],
            Self::Operations => &[
                "运营", "operation", "营销", "marketing", "推广", "promotion", "增长", "growth",
                "用户运营", "内容运营", "活动运营", "社群", "新媒体",
            ],
            Self::Sales => &[
                "销售", "sales", "商务", "business", "bd", "客户", "account", "渠道", "市场",
                "业务",
            ],
            Self::Management => &[
                "经理", "manager", "总监", "director", "主管", "supervisor", "领导", "lead",
                "负责人", "团队长",
            ],
            Self::HumanResources => &[
                "人力", "hr", "招聘", "recruit", "培训", "training", "薪酬", "绩效", "hrbp",
                "人事",
            ],
            Self::Finance => &[
                "财务", "finance", "会计", "accounting", "审计", "audit", "税务", "成本", "预算",
                "投资",
            ],
            Self::Data => &[
                "数据", "data", "分析师", "analyst", "bi", "数据科学", "数据挖掘", "统计",
            ],
            Self::General => &[],
        }
    }

    /// Opening follow-ups after the self-introduction
    fn introduction_pool(&self) -> &'static [&'static str] {
        match self {
            Self::Engineering => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近参与的一个技术项目吗？特别是你使用的技术栈和遇到的挑战？",
                "感谢你的介绍。从你的背景来看，你在技术领域有不错的积累。我想了解一下，在你的项目经验中，有没有遇到过技术难题？你是如何解决的？",
                "听起来你的经验很丰富。我想深入了解一下你的技术能力。你认为自己在{title}这个方向上的核心优势是什么？",
            ],
            Self::Design => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近完成的一个设计项目吗？特别是你的设计思路和创作过程？",
                "感谢你的介绍。从你的背景来看，你在设计领域有不错的积累。我想了解一下，你是如何平衡美观性和实用性的？",
                "听起来你的经验很丰富。我想深入了解一下你的设计理念。你认为好的设计应该具备哪些特质？",
            ],
            Self::Product => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近负责的一个产品项目吗？特别是你的产品思路和规划过程？",
                "感谢你的介绍。从你的背景来看，你在产品领域有不错的积累。我想了解一下，你是如何进行用户需求分析的？",
                "听起来你的经验很丰富。我想深入了解一下你的产品方法论。你是如何定义产品成功的？",
            ],
            Self::Operations => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近执行的一个运营项目吗？特别是你的运营策略和执行过程？",
                "感谢你的介绍。从你的背景来看，你在运营领域有不错的积累。我想了解一下，你是如何制定运营目标和衡量效果的？",
                "听起来你的经验很丰富。我想深入了解一下你的运营思路。你认为成功的运营应该具备哪些要素？",
            ],
            Self::Sales => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近完成的一个销售项目吗？特别是你的销售策略和客户沟通过程？",
                "感谢你的介绍。从你的背景来看，你在销售领域有不错的积累。我想了解一下，你是如何建立和维护客户关系的？",
                "听起来你的经验很丰富。我想深入了解一下你的销售理念。你认为成功的销售应该具备哪些素质？",
            ],
            Self::Management => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近管理的一个团队项目吗？特别是你的管理理念和团队建设过程？",
                "感谢你的介绍。从你的背景来看，你在管理领域有不错的积累。我想了解一下，你是如何激励团队和提升团队效率的？",
                "听起来你的经验很丰富。我想深入了解一下你的管理风格。你认为优秀的管理者应该具备哪些特质？",
            ],
            Self::HumanResources => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近处理的一个人力资源项目吗？特别是你的工作方法和解决方案？",
                "感谢你的介绍。从你的背景来看，你在人力资源领域有不错的积累。我想了解一下，你是如何平衡员工需求和公司利益的？",
                "听起来你的经验很丰富。我想深入了解一下你的HR理念。你认为人力资源工作的核心价值是什么？",
            ],
            Self::Finance => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近处理的一个财务项目吗？特别是你的分析方法和解决方案？",
                "感谢你的介绍。从你的背景来看，你在财务领域有不错的积累。我想了解一下，你是如何进行财务风险控制的？",
                "听起来你的经验很丰富。我想深入了解一下你的财务理念。你认为财务工作对企业发展的重要性体现在哪里？",
            ],
            Self::Data => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近完成的一个数据分析项目吗？特别是你的分析思路和方法？",
                "感谢你的介绍。从你的背景来看，你在数据领域有不错的积累。我想了解一下，你是如何从数据中发现业务洞察的？",
                "听起来你的经验很丰富。我想深入了解一下你的数据思维。你认为数据分析对业务决策的价值体现在哪里？",
            ],
            Self::General => &[
                "很好的自我介绍！我注意到你应聘的是{title}职位。能详细说说你最近参与的一个相关项目吗？特别是你在其中承担的角色和遇到的挑战？",
                "感谢你的介绍。从你的背景来看，你在这个领域有不错的积累。我想了解一下，在你的工作经验中，有没有遇到过特别有挑战性的问题？你是如何解决的？",
                "听起来你的经验很丰富。我想深入了解一下你的专业技能。你认为自己在{title}这个方向上的核心优势是什么？",
            ],
        }
    }

    /// Role-specific questions
    fn technical_pool(&self) -> &'static [&'static str] {
        match self {
            Self::Engineering => &[
                "这个技术方案很有意思。那么在{title}的工作中，你是如何保证代码质量和系统稳定性的？",
                "你的技术思路很清晰。我想问一个具体问题：如果让你设计一个与{title}相关的系统，你会考虑哪些关键因素？",
                "很好的回答。现在我想了解你的学习能力。技术更新很快，你是如何保持技术敏感度的？最近学习了哪些新技术？",
                "从技术角度来看，你的基础很扎实。那么在团队协作方面，你是如何与其他技术同事配合的？",
            ],
            Self::Design => &[
                "这个设计理念很有意思。那么在{title}的工作中，你是如何与产品和开发团队协作的？",
                "你的设计思维很清晰。我想问一个具体问题：如果用户对你的设计方案有不同意见，你会如何处理？",
                "很好的回答。现在我想了解你的工具使用。你熟悉哪些设计软件？在设计流程中是如何运用的？",
                "从设计角度来看，你的想法很有创意。那么你是如何保持设计灵感和跟上设计趋势的？",
            ],
            Self::Product => &[
                "这个产品思路很有意思。那么在{title}的工作中，你是如何与技术和设计团队协作的？",
                "你的产品思维很清晰。我想问一个具体问题：如果产品数据表现不佳，你会如何分析原因并制定改进方案？",
                "很好的回答。现在我想了解你的市场敏感度。你是如何关注竞品动态和行业趋势的？",
                "从产品角度来看，你的思路很系统。那么你是如何制定产品路线图和优先级的？",
            ],
            Self::Operations => &[
                "这个运营策略很有意思。那么在{title}的工作中，你是如何进行用户增长和留存的？",
                "你的运营思维很清晰。我想问一个具体问题：如果运营数据出现下滑，你会如何分析原因并制定应对策略？",
                "很好的回答。现在我想了解你的数据分析能力。你是如何通过数据来指导运营决策的？",
                "从运营角度来看，你的方法很实用。那么你是如何与产品、市场等其他部门协作的？",
            ],
            Self::Sales => &[
                "这个销售方法很有意思。那么在{title}的工作中，你是如何处理客户异议和拒绝的？",
                "你的销售思维很清晰。我想问一个具体问题：如果遇到销售业绩下滑，你会如何分析原因并制定改进计划？",
                "很好的回答。现在我想了解你的客户管理。你是如何维护老客户并开发新客户的？",
                "从销售角度来看，你的方法很专业。那么你是如何与市场、产品等其他部门协作的？",
            ],
            Self::Management => &[
                "这个管理方法很有意思。那么在{title}的工作中，你是如何处理团队冲突和绩效问题的？",
                "你的管理思维很清晰。我想问一个具体问题：如果团队目标没有达成，你会如何分析原因并制定改进措施？",
                "很好的回答。现在我想了解你的决策能力。你是如何在压力下做出重要决策的？",
                "从管理角度来看，你的理念很成熟。那么你是如何培养和发展团队成员的？",
            ],
            Self::HumanResources => &[
                "这个HR方案很有意思。那么在{title}的工作中，你是如何进行人才招聘和选拔的？",
                "你的HR思维很清晰。我想问一个具体问题：如果遇到员工关系问题，你会如何处理和调解？",
                "很好的回答。现在我想了解你的培训发展。你是如何设计和实施员工培训计划的？",
                "从HR角度来看，你的方法很专业。那么你是如何与各部门协作，支持业务发展的？",
            ],
            Self::Finance => &[
                "这个财务分析很有意思。那么在{title}的工作中，你是如何进行成本控制和预算管理的？",
                "你的财务思维很清晰。我想问一个具体问题：如果发现财务异常，你会如何调查和处理？",
                "很好的回答。现在我想了解你的报表分析。你是如何通过财务数据为业务决策提供支持的？",
                "从财务角度来看，你的方法很严谨。那么你是如何与业务部门协作，支持公司发展的？",
            ],
            Self::Data => &[
                "这个数据分析很有意思。那么在{title}的工作中，你是如何保证数据质量和准确性的？",
                "你的数据思维很清晰。我想问一个具体问题：如果数据结果与预期不符，你会如何验证和调整分析方法？",
                "很好的回答。现在我想了解你的工具使用。你熟悉哪些数据分析工具？在项目中是如何运用的？",
                "从数据角度来看，你的方法很科学。那么你是如何将分析结果转化为业务建议的？",
            ],
            Self::General => &[
                "这个解决方案很有意思。那么在{title}的工作中，你通常是如何与同事配合完成项目的？",
                "你的思路很清晰。我想问一个更具体的问题：如果让你负责一个重要的{title}相关项目，你会如何规划和执行？",
                "很好的回答。现在我想了解你的学习能力。这个行业变化很快，你是如何保持技能更新的？",
                "从专业角度来看，你的基础很扎实。那么在工作中，你是如何保证工作质量和效率的？",
            ],
        }
    }
}

/// Shared across all job categories
const BEHAVIORAL_POOL: &[&str] = &[
    "你处理这个问题的方式很专业。我想了解一下，在你的工作经历中，有没有遇到过特别有挑战性的deadline？你是如何应对的？",
    "团队协作能力对这个职位很重要。能说说你在团队中通常扮演什么角色？有没有遇到过团队冲突，你是如何解决的？",
    "很好的例子。那么对于这个{title}职位，你有什么期望？你认为自己能为我们团队带来什么价值？",
];

const CLOSING_POOL: &[&str] = &[
    "感谢你详细的回答，你展现了很强的专业能力和学习态度。现在轮到你了，你有什么问题想要问我关于这个职位或者我们公司的吗？",
    "通过这次交流，我对你的能力有了很好的了解。在结束之前，你还有什么想要补充的吗？或者有什么问题想要了解？",
    "这是一次很愉快的面试。最后，你对这个职位还有什么疑问吗？或者想了解我们团队的工作方式？",
];

/// Statements that replace the reply when the turn budget is reached
const ENDING_POOL: &[&str] = &[
    "感谢您今天参加我们的面试。通过刚才的交流，我对您的能力和经验有了很好的了解。本次面试到此结束，我们会在近期内给您反馈结果。再次感谢您的时间！",
    "非常感谢您抽出宝贵时间参加今天的面试。您在面试中展现出的专业素养给我留下了深刻印象。本次面试就到这里，我们会尽快处理并通知您面试结果。",
    "今天的面试就到这里结束了。感谢您详细回答了我们的问题，您的表现很不错。我们会综合评估今天的面试情况，并在后续与您联系。谢谢您的参与！",
    "本次面试已经完成，感谢您的积极配合和精彩回答。我们已经收集到了足够的信息来评估您的能力。接下来我们会进行内部讨论，稍后会通知您结果。",
];

/// Classify a job title by case-insensitive keyword match.
pub fn classify_job_title(title: &str) -> JobCategory {
    let lower = title.to_lowercase();
    JobCategory::MATCH_ORDER
        .iter()
        .copied()
        .find(|category| category.keywords().iter().any(|kw| lower.contains(kw)))
        .unwrap_or(JobCategory::General)
}

/// Local interviewer. Stateless; the caller owns the RNG and the turn count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSimulator;

impl ResponseSimulator {
    /// Pick an interviewer utterance for `phase`. Never empty.
    pub fn reply<R: Rng + ?Sized>(job_title: &str, phase: InterviewPhase, rng: &mut R) -> String {
        let category = classify_job_title(job_title);
        let pool = match phase {
            InterviewPhase::Introduction => category.introduction_pool(),
            InterviewPhase::Technical => category.technical_pool(),
            InterviewPhase::Behavioral => BEHAVIORAL_POOL,
            InterviewPhase::Closing => CLOSING_POOL,
        };
        pool.choose(rng)
            .map(|template| template.replace("{title}", job_title))
            .unwrap_or_else(|| GENERIC_REPLY.to_string())
    }

    /// One of the fixed end-of-interview statements
    pub fn closing_statement<R: Rng + ?Sized>(rng: &mut R) -> String {
        ENDING_POOL
            .choose(rng)
            .copied()
            .unwrap_or(GENERIC_REPLY)
            .to_string()
    }

    /// Up to three static hints for the candidate's next answer
    pub fn suggestions(phase: InterviewPhase) -> Vec<String> {
        let hints: [&str; 3] = match phase {
            InterviewPhase::Introduction => {
                ["详细描述你的项目经验", "突出你的核心技能", "展示你的学习能力"]
            }
            InterviewPhase::Technical => [
                "用具体例子支撑你的回答",
                "展示你的技术深度",
                "说明你的解决问题思路",
            ],
            InterviewPhase::Behavioral => [
                "分享具体的工作场景",
                "展现你的团队协作能力",
                "体现你的责任心和主动性",
            ],
            InterviewPhase::Closing => {
                ["准备一些有深度的问题", "展现你对职位的兴趣", "总结你的核心优势"]
            }
        };
        hints.iter().map(|s| s.to_string()).collect()
    }
}
