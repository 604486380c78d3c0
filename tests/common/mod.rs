#![allow(dead_code)]

pub use joblaunch_test_utils::{builders, init_tracing};

/// Project root every in-memory fixture tree lives under.
pub const ROOT: &str = "/project";

pub const LOTS_OF_ARGS_JOB: &str = r##"# frozen_string_literal: true

class LotsOfArgsJob
  include Sidekiq::Job

  # rubocop:disable Metrics/ParameterLists
  def perform(name, count, weight, height, width, other)
    puts("running #{name}")
  end
  # rubocop:enable Metrics/ParameterLists
end
"##;

pub const HOMONYMOUS_JOB: &str = r##"# frozen_string_literal: true

class HomonymousJob
  include Sidekiq::Job

  def perform(name, count)
    puts("Homonymous Job A: #{name} #{count}")
  end
end
"##;

pub const NAMESPACED_HOMONYMOUS_JOB: &str = r##"# frozen_string_literal: true

require 'sidekiq'

module ModuleB
  class HomonymousJob
    include Sidekiq::Job

    def perform(name, count, stuff)
      puts("Homonymous Job B: #{name} #{count} #{stuff}")
    end
  end
end
"##;

pub const NAMED_PARAMS_JOB: &str = r##"# frozen_string_literal: true

class NamedParamsJob
  include Sidekiq::Job

  def perform(name:, count:)
    puts("#{name} #{count}")
  end
end
"##;

pub const DEFAULT_PARAMS_JOB: &str = r##"# frozen_string_literal: true

class DefaultParamsJob
  include Sidekiq::Job

  def perform(name: 'default_name', count: 1)
    puts("#{name} #{count}")
  end
end
"##;

pub const MISCONFIGURED_JOB: &str = r##"# frozen_string_literal: true

class MisconfiguredJob
  include Sidekiq::Job

  def perform_badly_named(name, count)
    puts("#{name} #{count}")
  end
end
"##;

pub const NO_PARAMS_JOB: &str = r##"# frozen_string_literal: true

require 'sidekiq'

class NoParamsJob
  include Sidekiq::Job

  def perform
    puts('No Params Job is running')
  end
end
"##;

pub const PLAIN_CLASS: &str = r##"class ReportFormatter
  def perform(report)
    report.to_s
  end
end
"##;

pub const OPTIONAL_PARAMS_JOB: &str = r##"class OptionalParamsJob
  include Sidekiq::Job

  def perform(account_id, retries = 3, dry_run = false)
  end
end
"##;

pub const YARD_TYPES_JOB: &str = r##"# frozen_string_literal: true

module SidekiqYard
  class TypesJob
    include Sidekiq::Job

    # Performs a sample sidekiq job
    # @param name [String] the name
    # @param count [Integer] the count
    # @param stuff [Array<String>] the stuff
    def perform(name, count, stuff)
      puts("#{name} #{count} #{stuff}")
    end
  end
end
"##;

pub const YARD_COMPLEX_TYPES_JOB: &str = r##"# frozen_string_literal: true

module SidekiqYard
  class ComplexTypesJob
    include Sidekiq::Job

    # Performs a sample sidekiq job
    # @param name [String, Hash] the name
    # @param count [Integer, Number] the count
    # @param stuff [Array<String,  Number>, Boolean] the stuff
    def perform(name, count, stuff)
      puts("#{name} #{count} #{stuff}")
    end
  end
end
"##;

pub const RBS_TYPES_JOB: &str = r##"# frozen_string_literal: true

module SidekiqRbs
  class TypesJob
    include Sidekiq::Job

    def perform(name, count, stuff)
      puts("#{name} #{count} #{stuff}")
    end
  end
end
"##;

pub const RBS_TYPES_SIG: &str = r##"module SidekiqRbs
  class TypesJob
    include Sidekiq::Job

    def perform: (String name, Float count, Array[untyped] stuff) -> void
  end
end
"##;

pub const RBS_COMPLEX_TYPES_JOB: &str = r##"# frozen_string_literal: true

module SidekiqRbs
  class ComplexTypesJob
    include Sidekiq::Job

    def perform(number, count, stuff)
      puts("#{number} #{count} #{stuff}")
    end
  end
end
"##;

pub const RBS_COMPLEX_TYPES_SIG: &str = r##"module SidekiqRbs
  class ComplexTypesJob
    include Sidekiq::Job

    def perform: (
      (Integer | Float) number,
      Numeric count,
      Array[String] | Hash[Symbol, untyped] | String stuff
    ) -> void
  end
end
"##;
